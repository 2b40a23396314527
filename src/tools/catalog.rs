//! Firebase tool catalog
//!
//! Names, descriptions and typed arguments of every Firebase MCP operation.
//! Argument structs drive both the input schema and local validation.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationErrors};

use crate::error::{Result, ToolError};
use crate::tools::names;

/// Static description of one Firebase operation
#[derive(Clone, Copy)]
pub struct ToolSpec {
    /// Operation name, shared by the remote and fallback tools
    pub name: &'static str,

    /// Description for the hosting agent
    pub description: &'static str,

    schema: fn() -> Value,
    shape: fn(&str, Value) -> Result<Map<String, Value>>,
}

impl ToolSpec {
    /// JSON Schema of the operation's arguments
    pub fn input_schema(&self) -> Value {
        (self.schema)()
    }

    /// Validate arguments and normalize them into the mapping sent to the server
    pub fn shape_arguments(&self, arguments: Value) -> Result<Map<String, Value>> {
        (self.shape)(self.name, arguments)
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec").field("name", &self.name).finish()
    }
}

/// All Firebase operations, in the order they are offered to agents
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        // Authentication
        spec::<VerifyTokenArgs>(
            names::AUTH_VERIFY_TOKEN,
            "Verify a Firebase ID token and return its decoded claims",
        ),
        spec::<UserArgs>(
            names::AUTH_GET_USER,
            "Get a Firebase Authentication user record by UID",
        ),
        spec::<CreateUserArgs>(
            names::AUTH_CREATE_USER,
            "Create a Firebase Authentication user from an email address",
        ),
        spec::<UserArgs>(
            names::AUTH_DELETE_USER,
            "Delete a Firebase Authentication user by UID",
        ),
        // Firestore
        spec::<NoArgs>(
            names::FIRESTORE_LIST_COLLECTIONS,
            "List the root collections of the Firestore database",
        ),
        spec::<CreateDocumentArgs>(
            names::FIRESTORE_CREATE_DOCUMENT,
            "Create a document with the given data in a Firestore collection",
        ),
        spec::<ListDocumentsArgs>(
            names::FIRESTORE_LIST_DOCUMENTS,
            "List the documents of a Firestore collection",
        ),
        spec::<DocumentArgs>(
            names::FIRESTORE_GET_DOCUMENT,
            "Get a single Firestore document by collection and ID",
        ),
        spec::<UpdateDocumentArgs>(
            names::FIRESTORE_UPDATE_DOCUMENT,
            "Update fields of an existing Firestore document",
        ),
        spec::<DocumentArgs>(
            names::FIRESTORE_DELETE_DOCUMENT,
            "Delete a Firestore document",
        ),
        // Storage
        spec::<ListFilesArgs>(
            names::STORAGE_LIST_FILES,
            "List files in the Cloud Storage bucket, optionally under a prefix",
        ),
        spec::<UploadFileArgs>(
            names::STORAGE_UPLOAD_FILE,
            "Upload text content to a path in the Cloud Storage bucket",
        ),
        spec::<FilePathArgs>(
            names::STORAGE_DOWNLOAD_FILE,
            "Download a file from the Cloud Storage bucket",
        ),
        spec::<FilePathArgs>(
            names::STORAGE_DELETE_FILE,
            "Delete a file from the Cloud Storage bucket",
        ),
    ]
}

/// Look up one operation by name
pub fn find(name: &str) -> Option<ToolSpec> {
    catalog().into_iter().find(|spec| spec.name == name)
}

fn spec<A>(name: &'static str, description: &'static str) -> ToolSpec
where
    A: DeserializeOwned + JsonSchema + Validate,
{
    ToolSpec {
        name,
        description,
        schema: schema_of::<A>,
        shape: shape::<A>,
    }
}

fn schema_of<A: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(A);
    serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// Check arguments against `A` and hand back the caller's mapping unchanged
fn shape<A>(tool: &str, arguments: Value) -> Result<Map<String, Value>>
where
    A: DeserializeOwned + Validate,
{
    let arguments = match arguments {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        other => return Err(invalid(tool, format!("expected an object, got {}", other))),
    };

    let args: A = serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| invalid(tool, e.to_string()))?;
    args.validate().map_err(|e| invalid(tool, e.to_string()))?;

    Ok(arguments)
}

fn invalid(tool: &str, message: String) -> crate::error::BridgeError {
    ToolError::InvalidArguments {
        tool: tool.to_string(),
        message,
    }
    .into()
}

// ==================== Arguments ====================

/// Operations without arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

impl Validate for NoArgs {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Ok(())
    }
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct VerifyTokenArgs {
    /// Firebase ID token issued to a client
    #[validate(length(min = 1))]
    pub id_token: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserArgs {
    /// User UID
    #[validate(length(min = 1))]
    pub uid: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserArgs {
    /// Email address of the new user
    #[validate(email)]
    pub email: String,

    /// Initial password
    #[serde(default)]
    #[validate(length(min = 6))]
    pub password: Option<String>,

    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateDocumentArgs {
    /// Collection name
    #[validate(length(min = 1))]
    pub collection: String,

    /// Document fields
    pub data: Map<String, Value>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct ListDocumentsArgs {
    /// Collection name
    #[validate(length(min = 1))]
    pub collection: String,

    /// Maximum number of documents to return
    #[serde(default)]
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct DocumentArgs {
    /// Collection name
    #[validate(length(min = 1))]
    pub collection: String,

    /// Document ID
    #[validate(length(min = 1))]
    pub document_id: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateDocumentArgs {
    /// Collection name
    #[validate(length(min = 1))]
    pub collection: String,

    /// Document ID
    #[validate(length(min = 1))]
    pub document_id: String,

    /// Fields to set
    pub data: Map<String, Value>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct ListFilesArgs {
    /// Only list files whose path starts with this prefix
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct UploadFileArgs {
    /// Destination path in the bucket
    #[validate(length(min = 1))]
    pub destination_path: String,

    /// File content
    pub content: String,

    /// MIME type, defaults to text/plain on the server
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct FilePathArgs {
    /// File path in the bucket
    #[validate(length(min = 1))]
    pub file_path: String,
}
