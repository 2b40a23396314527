//! Agent tools
//!
//! Remote wrappers backed by the Firebase MCP server and local fallback tools
//! answering under the same names.

pub mod catalog;
pub mod fallback;
pub mod firebase;
pub mod registry;

pub use catalog::{catalog, ToolSpec};
pub use fallback::{fallback_tools, FallbackTool};
pub use firebase::{remote_tools, RemoteTool};
pub use registry::{Tool, ToolRegistry};

/// Firebase operation names
pub mod names {
    pub const AUTH_VERIFY_TOKEN: &str = "auth_verify_token";
    pub const AUTH_GET_USER: &str = "auth_get_user";
    pub const AUTH_CREATE_USER: &str = "auth_create_user";
    pub const AUTH_DELETE_USER: &str = "auth_delete_user";

    pub const FIRESTORE_LIST_COLLECTIONS: &str = "firestore_list_collections";
    pub const FIRESTORE_CREATE_DOCUMENT: &str = "firestore_create_document";
    pub const FIRESTORE_LIST_DOCUMENTS: &str = "firestore_list_documents";
    pub const FIRESTORE_GET_DOCUMENT: &str = "firestore_get_document";
    pub const FIRESTORE_UPDATE_DOCUMENT: &str = "firestore_update_document";
    pub const FIRESTORE_DELETE_DOCUMENT: &str = "firestore_delete_document";

    pub const STORAGE_LIST_FILES: &str = "storage_list_files";
    pub const STORAGE_UPLOAD_FILE: &str = "storage_upload_file";
    pub const STORAGE_DOWNLOAD_FILE: &str = "storage_download_file";
    pub const STORAGE_DELETE_FILE: &str = "storage_delete_file";

    pub const ALL: [&str; 14] = [
        AUTH_VERIFY_TOKEN,
        AUTH_GET_USER,
        AUTH_CREATE_USER,
        AUTH_DELETE_USER,
        FIRESTORE_LIST_COLLECTIONS,
        FIRESTORE_CREATE_DOCUMENT,
        FIRESTORE_LIST_DOCUMENTS,
        FIRESTORE_GET_DOCUMENT,
        FIRESTORE_UPDATE_DOCUMENT,
        FIRESTORE_DELETE_DOCUMENT,
        STORAGE_LIST_FILES,
        STORAGE_UPLOAD_FILE,
        STORAGE_DOWNLOAD_FILE,
        STORAGE_DELETE_FILE,
    ];
}
