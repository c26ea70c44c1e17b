//! Postman v2.1 collection emission.
//!
//! One collection per model: every renamed five-part test case under the
//! model's destination directory becomes a POST request whose body is the
//! test case's JSON.

use std::path::{Path, PathBuf};

use fixture_model::{ModelDescriptor, PayloadFamily};
use fixture_transform::RenamedCase;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{OutputError, Result};

/// Postman collection schema URL.
pub const SCHEMA_V2_1: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

const GBDF_TRANSACTION_ID: &str = "20115660390020220225161114893";
const WGS_TRANSACTION_ID: &str = "20220117181853TMBL20359Cl893580999";
const WGS_SOURCE_ENVIRONMENT: &str = "IMSH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,
    pub item: Vec<Item>,
    pub variable: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub name: String,
    pub description: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<Header>,
    pub url: Url,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Header {
    fn text(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            kind: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
    pub options: BodyOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Endpoint values written into every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSettings {
    /// Value of the `baseUrl` variable.
    pub base_url: String,
    /// Literal URL stored in each request's `url.raw`.
    pub request_url: String,
}

/// Headers sent with every request of a payload family.
pub fn headers_for(family: PayloadFamily) -> Vec<Header> {
    match family {
        PayloadFamily::Gbdf => vec![Header::text("Client_Transaction_ID", GBDF_TRANSACTION_ID)],
        PayloadFamily::Wgs => vec![
            Header::text("Content-Type", "application/json"),
            Header::text("meta-transid", WGS_TRANSACTION_ID),
            Header::text("meta-src-envrmt", WGS_SOURCE_ENVIRONMENT),
        ],
    }
}

/// Where and under which names a collection is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    pub collection_name: String,
    pub file_name: String,
    pub family: PayloadFamily,
    /// Directory the collection file is written into.
    pub output_dir: PathBuf,
}

impl CollectionTarget {
    /// `<collections_root>/<family dir>/<collection name>/<collection file>`
    pub fn for_model(model: &ModelDescriptor, collections_root: &Path) -> Self {
        let category = model.category();
        Self {
            collection_name: model.collection_name().to_string(),
            file_name: model.collection_file_name().to_string(),
            family: category.payload_family(),
            output_dir: collections_root
                .join(category.collection_subdir())
                .join(model.collection_name()),
        }
    }

    /// A collection for an arbitrary directory.
    pub fn custom(
        collection_name: &str,
        family: PayloadFamily,
        collections_root: &Path,
    ) -> Self {
        Self {
            collection_name: collection_name.to_string(),
            file_name: "postman_collection.json".to_string(),
            family,
            output_dir: collections_root.join(collection_name),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

/// Lists `.json` files below `dir`, recursively, sorted by path.
pub(crate) fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|e| OutputError::DirectoryRead {
            path: current.clone(),
            source: e,
        })?;
        for entry_result in entries {
            let entry = entry_result.map_err(|e| OutputError::DirectoryRead {
                path: current.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn pretty_body(path: &Path) -> String {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));
    let value = match parsed {
        Ok(value) => value,
        Err(error) => {
            warn!(path = %path.display(), %error, "unreadable test case, using empty body");
            Value::Object(serde_json::Map::new())
        }
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

fn request_item(path: &Path, family: PayloadFamily, settings: &CollectionSettings) -> Item {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();
    Item {
        name,
        request: Request {
            method: "POST".to_string(),
            header: headers_for(family),
            url: Url {
                raw: settings.request_url.clone(),
                host: vec!["{{baseUrl}}".to_string()],
                path: vec![
                    "api".to_string(),
                    "validate".to_string(),
                    "{{tc_id}}".to_string(),
                ],
            },
            body: Body {
                mode: "raw".to_string(),
                raw: pretty_body(path),
                options: BodyOptions {
                    raw: RawOptions {
                        language: "json".to_string(),
                    },
                },
            },
        },
    }
}

/// Builds a collection from the renamed test cases under `dir`.
///
/// Files that are not five-part renamed names are ignored.
pub fn build_collection(
    dir: &Path,
    collection_name: &str,
    family: PayloadFamily,
    settings: &CollectionSettings,
) -> Result<Collection> {
    if !dir.is_dir() {
        return Err(OutputError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut items = Vec::new();
    for path in collect_json_files(dir)? {
        let is_renamed = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(RenamedCase::parse)
            .is_some();
        if !is_renamed {
            debug!(path = %path.display(), "not a renamed test case, skipped");
            continue;
        }
        items.push(request_item(&path, family, settings));
    }

    Ok(Collection {
        info: CollectionInfo {
            postman_id: Uuid::new_v4().to_string(),
            name: format!("{collection_name} API Collection"),
            description: format!("API collection for {collection_name} test cases"),
            schema: SCHEMA_V2_1.to_string(),
        },
        item: items,
        variable: vec![Variable {
            key: "baseUrl".to_string(),
            value: settings.base_url.clone(),
            kind: "string".to_string(),
        }],
    })
}

/// Writes `collection` as pretty JSON to `path`, creating parent directories.
pub fn write_collection(collection: &Collection, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let json = serde_json::to_string_pretty(collection).map_err(|e| OutputError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Builds and writes a collection. Returns `None` when there is nothing to emit.
pub fn emit_collection(
    dir: &Path,
    target: &CollectionTarget,
    settings: &CollectionSettings,
) -> Result<Option<PathBuf>> {
    let collection = build_collection(dir, &target.collection_name, target.family, settings)?;
    if collection.item.is_empty() {
        warn!(dir = %dir.display(), "no renamed test cases, collection not written");
        return Ok(None);
    }

    let path = target.path();
    write_collection(&collection, &path)?;
    info!(
        path = %path.display(),
        requests = collection.item.len(),
        "collection written"
    );
    Ok(Some(path))
}
