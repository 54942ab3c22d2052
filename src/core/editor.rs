//! Admin editing as staged changes: a [`Draft`] holds a private copy of the
//! whole translations mapping, edits are pure transforms over that copy, and
//! nothing reaches the live site until the draft is published.

use std::{collections::HashMap, fmt, str::FromStr, time::Duration};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    core::{content::ContentService, defaults::default_bundle, language::Language},
    error::{CmsError, Result},
    types::{Translations, WebsiteData},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
    /// List entry whose `id` field equals the value.
    Id(String),
}

/// Location of a field inside a content bundle, written as slash-separated
/// segments: `services/@p1/title`, `about/cvItems/0/logoUrl`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    fn split_last(&self) -> Option<(&Segment, &[Segment])> {
        self.0.split_last()
    }
}

impl FromStr for FieldPath {
    type Err = CmsError;

    fn from_str(raw: &str) -> Result<Self> {
        let segments = raw
            .trim_matches('/')
            .split('/')
            .map(|part| {
                if part.is_empty() {
                    Err(CmsError::invalid_path(format!("empty segment in {:?}", raw)))
                } else if let Some(id) = part.strip_prefix('@') {
                    Ok(Segment::Id(id.to_string()))
                } else if let Ok(index) = part.parse::<usize>() {
                    Ok(Segment::Index(index))
                } else {
                    Ok(Segment::Key(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FieldPath(segments))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = CmsError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|segment| match segment {
                Segment::Key(key) => key.clone(),
                Segment::Index(index) => index.to_string(),
                Segment::Id(id) => format!("@{}", id),
            })
            .collect();
        f.write_str(&parts.join("/"))
    }
}

/// A single change to the active bundle of a draft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Replace the value at `path`; object keys that don't exist yet are created.
    Set { path: FieldPath, value: Value },
    /// Push onto the list at `path`, or a fresh template entry when `value` is omitted.
    Append {
        path: FieldPath,
        #[serde(default)]
        value: Option<Value>,
    },
    Remove { path: FieldPath },
    /// Move the list entry at `path` to position `to` in the same list.
    Move { path: FieldPath, to: usize },
}

impl Edit {
    pub fn apply(&self, data: &WebsiteData) -> Result<WebsiteData> {
        let mut tree = serde_json::to_value(data)?;
        match self {
            Edit::Set { path, value } => set(&mut tree, path, value.clone())?,
            Edit::Append { path, value } => {
                let entry = match value {
                    Some(value) => value.clone(),
                    None => template_for(path)?,
                };
                list_at(&mut tree, path)?.push(entry);
            }
            Edit::Remove { path } => {
                let (list, index) = entry_at(&mut tree, path)?;
                list.remove(index);
            }
            Edit::Move { path, to } => {
                let (list, index) = entry_at(&mut tree, path)?;
                if *to >= list.len() {
                    return Err(CmsError::invalid_path(format!(
                        "cannot move {} to {}, list has {} entries",
                        path,
                        to,
                        list.len()
                    )));
                }
                let entry = list.remove(index);
                list.insert(*to, entry);
            }
        }
        let data: WebsiteData = serde_json::from_value(tree)
            .map_err(|error| CmsError::invalid_edit(error.to_string()))?;
        // Unknown keys are dropped on deserialize, so a typo would vanish silently.
        if let Edit::Set { path, value } = self {
            if !value.is_null() {
                let mut check = serde_json::to_value(&data)?;
                walk(&mut check, path.segments()).map_err(|_| {
                    CmsError::invalid_path(format!("{} is not a content field", path))
                })?;
            }
        }
        Ok(data)
    }
}

fn step<'a>(node: &'a mut Value, segment: &Segment) -> Result<&'a mut Value> {
    match (segment, node) {
        (Segment::Key(key), Value::Object(map)) => map
            .get_mut(key)
            .ok_or_else(|| CmsError::invalid_path(format!("no field {:?}", key))),
        (Segment::Index(index), Value::Array(list)) => {
            let len = list.len();
            list.get_mut(*index).ok_or_else(|| {
                CmsError::invalid_path(format!("index {} out of range ({} entries)", index, len))
            })
        }
        (Segment::Id(id), Value::Array(list)) => {
            let index = position_of(list, id)?;
            Ok(&mut list[index])
        }
        (segment, _) => Err(CmsError::invalid_path(format!(
            "{:?} does not match the content shape",
            segment
        ))),
    }
}

fn walk<'a>(root: &'a mut Value, segments: &[Segment]) -> Result<&'a mut Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| step(node, segment))
}

fn position_of(list: &[Value], id: &str) -> Result<usize> {
    list.iter()
        .position(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
        .ok_or_else(|| CmsError::invalid_path(format!("no entry with id {:?}", id)))
}

fn set(root: &mut Value, path: &FieldPath, value: Value) -> Result<()> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| CmsError::invalid_path("empty path"))?;
    let parent = walk(root, parents)?;
    match (last, parent) {
        (Segment::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (segment, parent) => {
            *step(parent, segment)? = value;
            Ok(())
        }
    }
}

/// The list at `path`. A missing final key is created as an empty list, the
/// way optional timelines start out.
fn list_at<'a>(root: &'a mut Value, path: &FieldPath) -> Result<&'a mut Vec<Value>> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| CmsError::invalid_path("empty path"))?;
    let parent = walk(root, parents)?;
    let node = match (last, parent) {
        (Segment::Key(key), Value::Object(map)) => map
            .entry(key.clone())
            .or_insert_with(|| Value::Array(Vec::new())),
        (segment, parent) => step(parent, segment)?,
    };
    match node {
        Value::Array(list) => Ok(list),
        _ => Err(CmsError::invalid_path(format!("{} is not a list", path))),
    }
}

fn entry_at<'a>(root: &'a mut Value, path: &FieldPath) -> Result<(&'a mut Vec<Value>, usize)> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| CmsError::invalid_path("empty path"))?;
    let list = match walk(root, parents)? {
        Value::Array(list) => list,
        _ => {
            return Err(CmsError::invalid_path(format!(
                "{} does not address a list entry",
                path
            )))
        }
    };
    let index = match last {
        Segment::Index(index) if *index < list.len() => *index,
        Segment::Index(index) => {
            return Err(CmsError::invalid_path(format!(
                "index {} out of range ({} entries)",
                index,
                list.len()
            )))
        }
        Segment::Id(id) => position_of(list, id)?,
        Segment::Key(key) => {
            return Err(CmsError::invalid_path(format!(
                "{:?} is not a list position",
                key
            )))
        }
    };
    Ok((list, index))
}

fn template_for(path: &FieldPath) -> Result<Value> {
    let list = match path.segments().last() {
        Some(Segment::Key(key)) => key.as_str(),
        _ => return Err(CmsError::invalid_path(format!("{} is not a list", path))),
    };
    let id = Uuid::new_v4().to_string();
    let entry = match list {
        "services" => json!({
            "id": id, "icon": "engineering", "title": "New", "mainTitle": "Service",
            "description": "", "resultLabel": "", "resultValue": "", "scopeTitle": "",
            "scopeItems": [], "ctaText": ""
        }),
        "projects" => json!({
            "id": id, "title": "New", "category": "Category", "image": "", "description": ""
        }),
        "insights" => json!({
            "id": id, "title": "New", "type": "Checklist", "description": "", "downloadUrl": "#"
        }),
        "partners" => json!({ "name": "New Partner", "url": "" }),
        "pillars" => json!({ "title": "New Pillar", "text": "" }),
        "cvItems" => json!({ "year": "2024", "role": "Role", "company": "Company", "logoUrl": "" }),
        "educationItems" => json!({
            "year": "2024", "degree": "Degree", "institution": "Institution", "logoUrl": ""
        }),
        "lecturingItems" => json!({
            "year": "2024", "role": "Role", "institution": "Institution", "logoUrl": ""
        }),
        "scopeItems" | "beliefs" => Value::String(String::new()),
        other => {
            return Err(CmsError::invalid_path(format!(
                "no template for list {:?}",
                other
            )))
        }
    };
    Ok(entry)
}

/// Staged changes to the full translations mapping, scoped to one active
/// language at a time.
#[derive(Clone, Debug)]
pub struct Draft {
    pub id: Uuid,
    pub language: Language,
    pub opened_at: DateTime<Utc>,
    translations: Translations,
}

impl Draft {
    /// Deep-copies `live`; nothing done to the draft is visible through it.
    pub fn open(live: &Translations, language: Language) -> Self {
        let mut draft = Draft {
            id: Uuid::new_v4(),
            language,
            opened_at: Utc::now(),
            translations: live.clone(),
        };
        draft.seed_active();
        draft
    }

    fn seed_active(&mut self) {
        self.translations
            .entry(self.language.code().to_string())
            .or_insert_with(|| default_bundle(self.language));
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn active(&self) -> &WebsiteData {
        &self.translations[self.language.code()]
    }

    pub fn switch_language(&mut self, language: Language) {
        self.language = language;
        self.seed_active();
    }

    /// Applies `edits` in order. If any of them fails the draft is left as it was.
    pub fn apply(&mut self, edits: &[Edit]) -> Result<()> {
        let mut next = self.active().clone();
        for edit in edits {
            next = edit.apply(&next)?;
            debug!(draft = %self.id, "Applied {:?}", edit);
        }
        self.translations
            .insert(self.language.code().to_string(), next);
        Ok(())
    }

    pub fn attach_media(&mut self, path: FieldPath, data_uri: String) -> Result<()> {
        self.apply(&[Edit::Set {
            path,
            value: Value::String(data_uri),
        }])
    }

    /// Persists the whole draft and makes it live. On failure the draft is
    /// handed back untouched so it can be retried or cancelled.
    pub async fn publish(self, content: &ContentService) -> std::result::Result<(), (Self, CmsError)> {
        match content.publish(self.translations.clone()).await {
            Ok(()) => Ok(()),
            Err(error) => Err((self, error)),
        }
    }

    pub fn cancel(self) {
        debug!(draft = %self.id, "Draft discarded");
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DraftView {
    pub id: Uuid,
    pub language: Language,
    pub data: WebsiteData,
}

impl From<&Draft> for DraftView {
    fn from(draft: &Draft) -> Self {
        DraftView {
            id: draft.id,
            language: draft.language,
            data: draft.active().clone(),
        }
    }
}

/// Open drafts by id. Drafts left alone for longer than `ttl` are evicted
/// whenever another one is opened.
pub struct Drafts {
    open: Mutex<HashMap<Uuid, Draft>>,
    ttl: Duration,
}

impl Drafts {
    pub fn new(ttl: Duration) -> Self {
        Drafts {
            open: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn insert(&self, draft: Draft) -> DraftView {
        let view = DraftView::from(&draft);
        let now = Utc::now();
        let mut open = self.open.lock();
        let before = open.len();
        open.retain(|_, stale| {
            (now - stale.opened_at)
                .to_std()
                .map(|age| age <= self.ttl)
                .unwrap_or(true)
        });
        if open.len() < before {
            info!("Evicted {} abandoned draft(s)", before - open.len());
        }
        info!(draft = %draft.id, language = %draft.language, "Draft opened");
        open.insert(draft.id, draft);
        view
    }

    /// Runs `change` against the draft; the draft keeps whatever state
    /// `change` leaves it in.
    pub fn update<T>(&self, id: Uuid, change: impl FnOnce(&mut Draft) -> Result<T>) -> Result<T> {
        let mut open = self.open.lock();
        let draft = open
            .get_mut(&id)
            .ok_or_else(|| CmsError::DraftNotFound(id.to_string()))?;
        change(draft)
    }

    pub fn view(&self, id: Uuid) -> Result<DraftView> {
        self.update(id, |draft| Ok(DraftView::from(&*draft)))
    }

    /// Removes the draft from the registry, for publishing or cancelling.
    pub fn take(&self, id: Uuid) -> Result<Draft> {
        self.open
            .lock()
            .remove(&id)
            .ok_or_else(|| CmsError::DraftNotFound(id.to_string()))
    }

    pub fn restore(&self, draft: Draft) {
        self.open.lock().insert(draft.id, draft);
    }
}
