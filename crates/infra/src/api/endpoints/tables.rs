//! Endpoint tables, one module per resource family.
//!
//! Paths are relative to `/restapi/v2`.

/// Calls that need no organization or workspace handle.
pub mod client {
    use super::super::Endpoint;

    pub const ORGS: Endpoint = Endpoint::get("get_orgs", "/orgs").field("orgs");
    pub const WORKSPACES: Endpoint = Endpoint::get("get_workspaces", "/workspaces");
    pub const OWNED_WORKSPACES: Endpoint =
        Endpoint::get("get_owned_workspaces", "/workspaces/owned").field("workspaces");
    pub const SHARED_WORKSPACES: Endpoint =
        Endpoint::get("get_shared_workspaces", "/workspaces/shared").field("workspaces");
    pub const RECENT_VIEWS: Endpoint =
        Endpoint::get("get_recent_views", "/recentviews").field("views");
    pub const DASHBOARDS: Endpoint = Endpoint::get("get_dashboards", "/dashboards");
    pub const OWNED_DASHBOARDS: Endpoint =
        Endpoint::get("get_owned_dashboards", "/dashboards/owned").field("views");
    pub const SHARED_DASHBOARDS: Endpoint =
        Endpoint::get("get_shared_dashboards", "/dashboards/shared").field("views");
    pub const WORKSPACE_DETAILS: Endpoint =
        Endpoint::get("get_workspace_details", "/workspaces/{workspace}").field("workspaces");
    pub const VIEW_DETAILS: Endpoint =
        Endpoint::get("get_view_details", "/views/{view}").field("views");
}

pub mod org {
    use super::super::Endpoint;

    pub const CREATE_WORKSPACE: Endpoint = Endpoint::post("create_workspace", "/workspaces")
        .requires(&["workspaceName"])
        .field("workspaceId");
    pub const ADMINS: Endpoint = Endpoint::get("get_admins", "/orgadmins").field("orgAdmins");
    pub const USERS: Endpoint = Endpoint::get("get_users", "/users").field("users");
    pub const ADD_USERS: Endpoint = Endpoint::post("add_users", "/users").requires(&["emailIds"]);
    pub const REMOVE_USERS: Endpoint =
        Endpoint::delete("remove_users", "/users").requires(&["emailIds"]);
    pub const ACTIVATE_USERS: Endpoint =
        Endpoint::put("activate_users", "/users/active").requires(&["emailIds"]);
    pub const DEACTIVATE_USERS: Endpoint =
        Endpoint::put("deactivate_users", "/users/inactive").requires(&["emailIds"]);
    pub const CHANGE_USER_ROLE: Endpoint =
        Endpoint::put("change_user_role", "/users/role").requires(&["emailIds", "role"]);
    pub const SUBSCRIPTION: Endpoint =
        Endpoint::get("get_subscription_details", "/subscription").field("subscription");
    pub const RESOURCES: Endpoint =
        Endpoint::get("get_resource_details", "/resources").field("resourceDetails");
    pub const META_DETAILS: Endpoint =
        Endpoint::get("get_meta_details", "/metadetails").requires(&["workspaceName"]);
}

pub mod workspace {
    use super::super::Endpoint;

    pub const COPY: Endpoint = Endpoint::post("copy", "/workspaces/{workspace}/copy")
        .requires(&["newWorkspaceName"])
        .field("workspaceId");
    pub const RENAME: Endpoint =
        Endpoint::put("rename", "/workspaces/{workspace}").requires(&["workspaceName"]);
    pub const DELETE: Endpoint = Endpoint::delete("delete", "/workspaces/{workspace}");
    pub const SECRET_KEY: Endpoint =
        Endpoint::get("get_secret_key", "/workspaces/{workspace}/secretkey").field("workspaceKey");
    pub const ADD_FAVORITE: Endpoint =
        Endpoint::post("add_favorite", "/workspaces/{workspace}/favorite");
    pub const REMOVE_FAVORITE: Endpoint =
        Endpoint::delete("remove_favorite", "/workspaces/{workspace}/favorite");
    pub const ADD_DEFAULT: Endpoint =
        Endpoint::post("add_default", "/workspaces/{workspace}/default");
    pub const REMOVE_DEFAULT: Endpoint =
        Endpoint::delete("remove_default", "/workspaces/{workspace}/default");
    pub const ADMINS: Endpoint =
        Endpoint::get("get_admins", "/workspaces/{workspace}/admins").field("workspaceAdmins");
    pub const ADD_ADMINS: Endpoint =
        Endpoint::post("add_admins", "/workspaces/{workspace}/admins").requires(&["emailIds"]);
    pub const REMOVE_ADMINS: Endpoint =
        Endpoint::delete("remove_admins", "/workspaces/{workspace}/admins").requires(&["emailIds"]);
    pub const SHARE_INFO: Endpoint = Endpoint::get("get_share_info", "/workspaces/{workspace}/share");
    pub const SHARE_VIEWS: Endpoint = Endpoint::post("share_views", "/workspaces/{workspace}/share")
        .requires(&["viewIds", "emailIds", "permissions"]);
    pub const REMOVE_SHARE: Endpoint =
        Endpoint::delete("remove_share", "/workspaces/{workspace}/share").requires(&["emailIds"]);
    pub const SHARED_DETAILS: Endpoint =
        Endpoint::get("get_shared_details_for_views", "/workspaces/{workspace}/share/shareddetails")
            .requires(&["viewIds"])
            .field("sharedDetails");
    pub const MY_PERMISSIONS: Endpoint =
        Endpoint::get("get_my_permissions", "/workspaces/{workspace}/share/mypermissions")
            .field("permissions");
    pub const VIEWS: Endpoint = Endpoint::get("get_views", "/workspaces/{workspace}/views").field("views");
    pub const CREATE_TABLE: Endpoint = Endpoint::post("create_table", "/workspaces/{workspace}/tables")
        .requires(&["tableDesign"])
        .field("viewId");
    pub const CREATE_QUERY_TABLE: Endpoint =
        Endpoint::post("create_query_table", "/workspaces/{workspace}/querytables")
            .requires(&["sqlQuery", "queryTableName"])
            .field("viewId");
    pub const EDIT_QUERY_TABLE: Endpoint =
        Endpoint::put("edit_query_table", "/workspaces/{workspace}/querytables/{view}")
            .requires(&["sqlQuery"]);
    pub const FOLDERS: Endpoint =
        Endpoint::get("get_folders", "/workspaces/{workspace}/folders").field("folders");
    pub const CREATE_FOLDER: Endpoint = Endpoint::post("create_folder", "/workspaces/{workspace}/folders")
        .requires(&["folderName"])
        .field("folderId");
    pub const RENAME_FOLDER: Endpoint =
        Endpoint::put("rename_folder", "/workspaces/{workspace}/folders/{folder}")
            .requires(&["folderName"]);
    pub const DELETE_FOLDER: Endpoint =
        Endpoint::delete("delete_folder", "/workspaces/{workspace}/folders/{folder}");
    pub const GROUPS: Endpoint =
        Endpoint::get("get_groups", "/workspaces/{workspace}/groups").field("groups");
    pub const CREATE_GROUP: Endpoint = Endpoint::post("create_group", "/workspaces/{workspace}/groups")
        .requires(&["groupName", "emailIds"])
        .field("groupId");
    pub const DELETE_GROUP: Endpoint =
        Endpoint::delete("delete_group", "/workspaces/{workspace}/groups/{group}");
    pub const SLIDESHOWS: Endpoint =
        Endpoint::get("get_slideshows", "/workspaces/{workspace}/slides").field("slideshows");
    pub const VARIABLES: Endpoint =
        Endpoint::get("get_variables", "/workspaces/{workspace}/variables").field("variables");
    pub const DATASOURCES: Endpoint =
        Endpoint::get("get_datasources", "/workspaces/{workspace}/datasources").field("dataSources");
    pub const SYNC_DATA: Endpoint =
        Endpoint::post("sync_data", "/workspaces/{workspace}/datasources/{datasource}/sync");
    pub const TRASH_VIEWS: Endpoint =
        Endpoint::get("get_trash_views", "/workspaces/{workspace}/trash").field("views");
    pub const RESTORE_TRASH_VIEW: Endpoint =
        Endpoint::post("restore_trash_view", "/workspaces/{workspace}/trash/{view}");
    pub const DELETE_TRASH_VIEW: Endpoint =
        Endpoint::delete("delete_trash_view", "/workspaces/{workspace}/trash/{view}");
}

pub mod view {
    use super::super::Endpoint;

    pub const DETAILS: Endpoint = Endpoint::get("get_details", "/workspaces/{workspace}/views/{view}");
    pub const RENAME: Endpoint =
        Endpoint::put("rename", "/workspaces/{workspace}/views/{view}").requires(&["viewName"]);
    pub const DELETE: Endpoint = Endpoint::delete("delete", "/workspaces/{workspace}/views/{view}");
    pub const SAVE_AS: Endpoint = Endpoint::post("save_as", "/workspaces/{workspace}/views/{view}/saveas")
        .requires(&["viewName"])
        .field("viewId");
    pub const COPY_FORMULAS: Endpoint =
        Endpoint::post("copy_formulas", "/workspaces/{workspace}/views/{view}/formulas/copy")
            .requires(&["formulaColumnNames", "destWorkspaceId"]);
    pub const ADD_FAVORITE: Endpoint =
        Endpoint::post("add_favorite", "/workspaces/{workspace}/views/{view}/favorite");
    pub const REMOVE_FAVORITE: Endpoint =
        Endpoint::delete("remove_favorite", "/workspaces/{workspace}/views/{view}/favorite");
    pub const MY_PERMISSIONS: Endpoint =
        Endpoint::get("get_my_permissions", "/workspaces/{workspace}/views/{view}/share/mypermissions")
            .field("permissions");
    pub const VIEW_URL: Endpoint =
        Endpoint::get("get_view_url", "/workspaces/{workspace}/views/{view}/publish").field("viewUrl");
    pub const EMBED_URL: Endpoint =
        Endpoint::get("get_embed_url", "/workspaces/{workspace}/views/{view}/publish/embed")
            .field("embedUrl");
    pub const PRIVATE_URL: Endpoint =
        Endpoint::get("get_private_url", "/workspaces/{workspace}/views/{view}/publish/privatelink")
            .field("privateUrl");
    pub const REMOVE_PRIVATE_ACCESS: Endpoint = Endpoint::delete(
        "remove_private_access",
        "/workspaces/{workspace}/views/{view}/publish/privatelink",
    );
    pub const MAKE_PUBLIC: Endpoint =
        Endpoint::post("make_view_public", "/workspaces/{workspace}/views/{view}/publish/public")
            .field("publicUrl");
    pub const REMOVE_PUBLIC: Endpoint =
        Endpoint::delete("remove_public_access", "/workspaces/{workspace}/views/{view}/publish/public");
    pub const ADD_COLUMN: Endpoint =
        Endpoint::post("add_column", "/workspaces/{workspace}/views/{view}/columns")
            .requires(&["columnName", "dataType"])
            .field("columnId");
    pub const HIDE_COLUMNS: Endpoint =
        Endpoint::put("hide_columns", "/workspaces/{workspace}/views/{view}/columns/hide")
            .requires(&["columnIds"]);
    pub const SHOW_COLUMNS: Endpoint =
        Endpoint::put("show_columns", "/workspaces/{workspace}/views/{view}/columns/show")
            .requires(&["columnIds"]);
    pub const RENAME_COLUMN: Endpoint =
        Endpoint::put("rename_column", "/workspaces/{workspace}/views/{view}/columns/{column}")
            .requires(&["columnName"]);
    pub const DELETE_COLUMN: Endpoint =
        Endpoint::delete("delete_column", "/workspaces/{workspace}/views/{view}/columns/{column}");
    pub const ADD_ROW: Endpoint = Endpoint::post("add_row", "/workspaces/{workspace}/views/{view}/rows")
        .requires(&["columns"])
        .data();
    pub const UPDATE_ROWS: Endpoint =
        Endpoint::put("update_rows", "/workspaces/{workspace}/views/{view}/rows")
            .requires(&["columns"])
            .data();
    pub const DELETE_ROWS: Endpoint =
        Endpoint::delete("delete_rows", "/workspaces/{workspace}/views/{view}/rows")
            .requires(&["criteria"])
            .field("deletedRows");
    pub const CUSTOM_FORMULAS: Endpoint =
        Endpoint::get("get_custom_formulas", "/workspaces/{workspace}/views/{view}/customformulas")
            .field("customFormulas");
    pub const ADD_CUSTOM_FORMULA: Endpoint =
        Endpoint::post("add_custom_formula", "/workspaces/{workspace}/views/{view}/customformulas")
            .requires(&["formulaName", "expression"])
            .field("formulaId");
    pub const DELETE_CUSTOM_FORMULA: Endpoint = Endpoint::delete(
        "delete_custom_formula",
        "/workspaces/{workspace}/views/{view}/customformulas/{formula}",
    );
    pub const REFETCH_DATA: Endpoint =
        Endpoint::post("refetch_data", "/workspaces/{workspace}/views/{view}/sync");
    pub const LAST_IMPORT_DETAILS: Endpoint =
        Endpoint::get("get_last_import_details", "/workspaces/{workspace}/views/{view}/importdetails");
}

pub mod bulk {
    use super::super::Endpoint;

    pub const IMPORT_NEW_TABLE: Endpoint =
        Endpoint::post("import_data_in_new_table", "/workspaces/{workspace}/data")
            .requires(&["tableName", "fileType", "autoIdentify"])
            .data();
    pub const IMPORT: Endpoint =
        Endpoint::post("import_data", "/workspaces/{workspace}/views/{view}/data")
            .requires(&["importType", "fileType", "autoIdentify"])
            .data();
    pub const IMPORT_NEW_TABLE_ASYNC: Endpoint =
        Endpoint::post("import_bulk_data_in_new_table", "/bulk/workspaces/{workspace}/data")
            .requires(&["tableName", "fileType", "autoIdentify"])
            .field("jobId");
    pub const IMPORT_ASYNC: Endpoint =
        Endpoint::post("import_bulk_data", "/bulk/workspaces/{workspace}/views/{view}/data")
            .requires(&["importType", "fileType", "autoIdentify"])
            .field("jobId");
    pub const IMPORT_BATCH: Endpoint = Endpoint::post(
        "import_bulk_data_as_batches",
        "/bulk/workspaces/{workspace}/views/{view}/data/batch",
    )
    .requires(&["batchKey", "isLastBatch", "importType", "autoIdentify", "fileType"])
    .data();
    pub const IMPORT_JOB: Endpoint =
        Endpoint::get("get_import_job_details", "/bulk/workspaces/{workspace}/importjobs/{job}");
    pub const EXPORT: Endpoint =
        Endpoint::get("export_data", "/workspaces/{workspace}/views/{view}/data")
            .requires(&["responseFormat"]);
    pub const EXPORT_QUERY: Endpoint =
        Endpoint::get("export_data_using_sql", "/workspaces/{workspace}/data")
            .requires(&["sqlQuery", "responseFormat"]);
    pub const EXPORT_ASYNC: Endpoint =
        Endpoint::get("initiate_bulk_export", "/bulk/workspaces/{workspace}/views/{view}/data")
            .field("jobId");
    pub const EXPORT_QUERY_ASYNC: Endpoint =
        Endpoint::get("initiate_bulk_export_using_sql", "/bulk/workspaces/{workspace}/data")
            .requires(&["sqlQuery"])
            .field("jobId");
    pub const EXPORT_JOB: Endpoint =
        Endpoint::get("get_export_job_details", "/bulk/workspaces/{workspace}/exportjobs/{job}");
    pub const EXPORT_JOB_DATA: Endpoint =
        Endpoint::get("export_bulk_data", "/bulk/workspaces/{workspace}/exportjobs/{job}/data");
}
