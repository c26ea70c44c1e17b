//! Payload mutation.
//!
//! Renamed test cases are rewritten so each run submits fresh claims:
//! WGS payloads are wrapped in the request envelope and get a new
//! `KEY_CHK_DCN_NBR`, GBDF payloads get a new `CLCL_ID`. Key order is
//! preserved and output is pretty-printed with two-space indentation.

use std::path::Path;

use fixture_model::{Category, PayloadFamily};
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, TransformError};

/// Field holding the WGS check/DCN number.
pub const CHECK_NUMBER_FIELD: &str = "KEY_CHK_DCN_NBR";
/// Field holding the GBDF claim identifier.
pub const CLAIM_ID_FIELD: &str = "CLCL_ID";

const CHECK_NUMBER_MIN: u64 = 10_000_000_000;
const CHECK_NUMBER_MAX: u64 = 99_999_999_999;

/// Envelope fields in output order. `payload` goes after `hints`.
const ENVELOPE_HEAD: [(&str, &str); 2] = [("adhoc", "true"), ("analyticId", " ")];
const ENVELOPE_HINT: &str = "congnitive_claims_async";
const ENVELOPE_TAIL: [(&str, &str); 3] = [
    ("responseRequired", "false"),
    ("meta-src-envrmt", "IMST"),
    ("meta-transid", "20220117181853TMBL20359Cl893580999"),
];

/// Which rewrite a category's payloads receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayloadMutation {
    /// Wrap in the WGS envelope and refresh `KEY_CHK_DCN_NBR`.
    Envelope,
    /// Refresh `CLCL_ID`.
    ClaimId,
}

impl PayloadMutation {
    pub fn for_category(category: Category) -> Self {
        match category.payload_family() {
            PayloadFamily::Wgs => Self::Envelope,
            PayloadFamily::Gbdf => Self::ClaimId,
        }
    }

    /// Mutates a parsed document in place.
    pub fn apply<R: Rng + ?Sized>(&self, doc: &mut Value, rng: &mut R) -> MutationReport {
        match self {
            Self::Envelope => apply_envelope(doc, rng),
            Self::ClaimId => apply_claim_id(doc, rng),
        }
    }
}

/// What a mutation changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MutationReport {
    /// The document was wrapped in the envelope by this call.
    pub wrapped: bool,
    /// Number of identifier fields rewritten.
    pub updated: usize,
}

/// Random 11-digit identifier.
pub fn random_check_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(CHECK_NUMBER_MIN..=CHECK_NUMBER_MAX).to_string()
}

/// True if the document already carries the envelope.
pub fn has_envelope(doc: &Value) -> bool {
    doc.as_object().is_some_and(|map| {
        map.contains_key("adhoc") && map.contains_key("payload") && map.contains_key("responseRequired")
    })
}

fn wrap_envelope(inner: Value) -> Value {
    let mut map = Map::new();
    for (key, value) in ENVELOPE_HEAD {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    map.insert(
        "hints".to_string(),
        Value::Array(vec![Value::String(ENVELOPE_HINT.to_string())]),
    );
    map.insert("payload".to_string(), inner);
    for (key, value) in ENVELOPE_TAIL {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    Value::Object(map)
}

fn envelope_keys() -> impl Iterator<Item = &'static str> {
    ENVELOPE_HEAD
        .iter()
        .map(|(key, _)| *key)
        .chain(std::iter::once("hints"))
        .chain(ENVELOPE_TAIL.iter().map(|(key, _)| *key))
}

fn apply_envelope<R: Rng + ?Sized>(doc: &mut Value, rng: &mut R) -> MutationReport {
    let mut report = MutationReport::default();

    if has_envelope(doc) {
        if let Some(payload) = doc.get_mut("payload").and_then(Value::as_object_mut) {
            for key in envelope_keys() {
                if payload.shift_remove(key).is_some() {
                    debug!(key, "removed duplicated envelope key from payload");
                }
            }
        }
    } else {
        let inner = doc.take();
        *doc = wrap_envelope(inner);
        report.wrapped = true;
    }

    if let Some(root) = doc.as_object_mut()
        && root.contains_key(CHECK_NUMBER_FIELD)
    {
        root.insert(
            CHECK_NUMBER_FIELD.to_string(),
            Value::String(random_check_number(rng)),
        );
        report.updated += 1;
    }
    if let Some(payload) = doc.get_mut("payload").and_then(Value::as_object_mut)
        && payload.contains_key(CHECK_NUMBER_FIELD)
    {
        payload.insert(
            CHECK_NUMBER_FIELD.to_string(),
            Value::String(random_check_number(rng)),
        );
        report.updated += 1;
    }
    report
}

fn replace_claim_id(target: Option<&mut Value>, claim_id: &str) -> bool {
    match target.and_then(Value::as_object_mut) {
        Some(map) if map.contains_key(CLAIM_ID_FIELD) => {
            map.insert(CLAIM_ID_FIELD.to_string(), Value::String(claim_id.to_string()));
            true
        }
        _ => false,
    }
}

fn first_claim_header(value: &mut Value) -> Option<&mut Value> {
    value.get_mut("claim_header")?.as_array_mut()?.first_mut()
}

fn apply_claim_id<R: Rng + ?Sized>(doc: &mut Value, rng: &mut R) -> MutationReport {
    // One identifier per file, shared by every location.
    let claim_id = random_check_number(rng);
    let mut updated = 0;

    if replace_claim_id(Some(&mut *doc), &claim_id) {
        updated += 1;
    }
    if replace_claim_id(doc.get_mut("payload"), &claim_id) {
        updated += 1;
    }
    if replace_claim_id(first_claim_header(doc), &claim_id) {
        updated += 1;
    }
    if replace_claim_id(doc.get_mut("payload").and_then(first_claim_header), &claim_id) {
        updated += 1;
    }

    MutationReport {
        wrapped: false,
        updated,
    }
}

/// Reads, mutates and rewrites one JSON file.
pub fn mutate_file<R: Rng + ?Sized>(
    path: &Path,
    mutation: PayloadMutation,
    rng: &mut R,
) -> Result<MutationReport> {
    let text = std::fs::read_to_string(path).map_err(|source| TransformError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut doc: Value = serde_json::from_str(&text).map_err(|source| TransformError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let report = mutation.apply(&mut doc, rng);
    if mutation == PayloadMutation::ClaimId && report.updated == 0 {
        warn!(path = %path.display(), "no {CLAIM_ID_FIELD} field found; file left unchanged");
        return Ok(report);
    }

    let json = serde_json::to_string_pretty(&doc).map_err(|source| TransformError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| TransformError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        wrapped = report.wrapped,
        updated = report.updated,
        "payload mutated"
    );
    Ok(report)
}
