//! Filter state for discover views and its query-string form.
//!
//! A [`FilterSchema`] lists the keys a view understands. A [`FilterCodec`]
//! holds two independent snapshots over that schema: `staged` (what the user
//! is editing) and `applied` (what the current URL says). Saving copies
//! staged into applied and returns the canonical query string.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

/// How the elements of a multi-value filter combine upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    /// TMDB reads `,` as AND and `|` as OR.
    pub fn delimiter(self) -> char {
        match self {
            Self::And => ',',
            Self::Or => '|',
        }
    }
}

/// Validation applied to a scalar value or to each element of a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRule {
    Text,
    Integer { min: i64, max: i64 },
    Decimal { min: f64, max: f64 },
    /// `YYYY-MM-DD`
    Date,
    OneOf(Vec<String>),
}

impl ValueRule {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Text => !value.is_empty(),
            Self::Integer { min, max } => value
                .parse::<i64>()
                .is_ok_and(|n| (*min..=*max).contains(&n)),
            Self::Decimal { min, max } => value
                .parse::<f64>()
                .is_ok_and(|n| n.is_finite() && n >= *min && n <= *max),
            Self::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            Self::OneOf(allowed) => allowed.iter().any(|a| a == value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    Scalar { default: String, rule: ValueRule },
    Multi { logic: Logic, item: ValueRule },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterDef {
    pub key: String,
    pub kind: FilterKind,
}

impl FilterDef {
    pub fn default_value(&self) -> FilterValue {
        match &self.kind {
            FilterKind::Scalar { default, .. } => FilterValue::Scalar(default.clone()),
            FilterKind::Multi { .. } => FilterValue::Multi(Selection::default()),
        }
    }

    /// Empty strings, empty selections and the declared default all count
    /// as "not set".
    pub fn is_default(&self, value: &FilterValue) -> bool {
        match (&self.kind, value) {
            (FilterKind::Scalar { default, .. }, FilterValue::Scalar(v)) => {
                v.is_empty() || v == default
            }
            (FilterKind::Multi { .. }, FilterValue::Multi(sel)) => sel.is_empty(),
            _ => true,
        }
    }

    /// Validate `value` for this def. `None` means the default applies.
    fn normalize(&self, value: FilterValue) -> Option<FilterValue> {
        let normalized = match (&self.kind, value) {
            (FilterKind::Scalar { rule, .. }, FilterValue::Scalar(v)) => {
                let v = v.trim().to_string();
                rule.accepts(&v).then_some(FilterValue::Scalar(v))
            }
            (FilterKind::Multi { item, .. }, FilterValue::Multi(sel)) => Some(FilterValue::Multi(
                sel.into_iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| item.accepts(v))
                    .collect(),
            )),
            _ => None,
        };
        normalized.filter(|v| !self.is_default(v))
    }
}

/// Recognized filter keys for one view, in serialization order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSchema {
    defs: Vec<FilterDef>,
}

impl FilterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, key: &str, default: &str, rule: ValueRule) -> Self {
        self.defs.push(FilterDef {
            key: key.to_string(),
            kind: FilterKind::Scalar {
                default: default.to_string(),
                rule,
            },
        });
        self
    }

    pub fn multi(mut self, key: &str, logic: Logic, item: ValueRule) -> Self {
        self.defs.push(FilterDef {
            key: key.to_string(),
            kind: FilterKind::Multi { logic, item },
        });
        self
    }

    pub fn def(&self, key: &str) -> Option<&FilterDef> {
        self.defs.iter().find(|d| d.key == key)
    }

    pub fn defs(&self) -> &[FilterDef] {
        &self.defs
    }

    /// Decode a raw query string (without `?`).
    ///
    /// Unknown keys are dropped, malformed scalars fall back to their
    /// default, malformed selection elements are dropped, and repeated keys
    /// of a multi-value filter are merged.
    pub fn decode(&self, query: &str) -> Filters {
        let mut filters = Filters::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
            else {
                debug!(pair, "dropping undecodable query pair");
                continue;
            };

            let Some(def) = self.def(&key) else {
                continue;
            };

            match &def.kind {
                FilterKind::Scalar { .. } => match def.normalize(FilterValue::Scalar(value)) {
                    Some(v) => {
                        filters.insert(key, v);
                    }
                    None => {
                        debug!(key = %key, "malformed scalar filter, using default");
                        filters.remove(&key);
                    }
                },
                FilterKind::Multi { logic, .. } => {
                    let parsed: Selection = value.split(logic.delimiter()).collect();
                    let Some(FilterValue::Multi(parsed)) =
                        def.normalize(FilterValue::Multi(parsed))
                    else {
                        continue;
                    };
                    let entry = filters
                        .entry(key)
                        .or_insert_with(|| FilterValue::Multi(Selection::default()));
                    if let FilterValue::Multi(existing) = entry {
                        for item in parsed {
                            existing.insert(item);
                        }
                    }
                }
            }
        }

        filters
    }

    /// Canonical query string for `filters`: schema order, defaults omitted.
    pub fn encode(&self, filters: &Filters) -> String {
        let mut parts = Vec::new();

        for def in &self.defs {
            let Some(value) = filters.get(&def.key) else {
                continue;
            };
            if def.is_default(value) {
                continue;
            }
            let key = urlencoding::encode(&def.key);
            match (&def.kind, value) {
                (FilterKind::Scalar { .. }, FilterValue::Scalar(v)) => {
                    parts.push(format!("{key}={}", urlencoding::encode(v)));
                }
                (FilterKind::Multi { logic, .. }, FilterValue::Multi(sel)) => {
                    let joined = sel
                        .iter()
                        .map(|v| urlencoding::encode(v).into_owned())
                        .collect::<Vec<_>>()
                        .join(&logic.delimiter().to_string());
                    parts.push(format!("{key}={joined}"));
                }
                _ => {}
            }
        }

        parts.join("&")
    }

    /// Key/value pairs for forwarding to the upstream API.
    pub fn to_pairs(&self, filters: &Filters) -> Vec<(String, String)> {
        self.defs
            .iter()
            .filter_map(|def| {
                let value = filters.get(&def.key)?;
                if def.is_default(value) {
                    return None;
                }
                let rendered = match value {
                    FilterValue::Scalar(v) => v.clone(),
                    FilterValue::Multi(sel) => match &def.kind {
                        FilterKind::Multi { logic, .. } => {
                            sel.join(&logic.delimiter().to_string())
                        }
                        FilterKind::Scalar { .. } => return None,
                    },
                };
                Some((def.key.clone(), rendered))
            })
            .collect()
    }
}

/// Form/query component decoding: `+` is a space, then percent-decoding.
fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|v| v.into_owned())
}

/// A set of selected values that remembers insertion order for display and
/// serialization. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// Returns `false` if the value was already present.
    pub fn insert(&mut self, value: String) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|v| v != value);
        self.0.len() != before
    }

    /// Add `value` if absent, remove it if present.
    pub fn toggle(&mut self, value: &str) {
        if !self.remove(value) {
            self.0.push(value.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self, sep: &str) -> String {
        self.0.join(sep)
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl Eq for Selection {}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut sel = Selection::default();
        for v in iter {
            sel.insert(v);
        }
        sel
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl IntoIterator for Selection {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Scalar(String),
    Multi(Selection),
}

impl FilterValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Multi(_) => None,
        }
    }

    pub fn as_selection(&self) -> Option<&Selection> {
        match self {
            Self::Multi(sel) => Some(sel),
            Self::Scalar(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Scalar(v)
    }
}

impl From<Selection> for FilterValue {
    fn from(sel: Selection) -> Self {
        Self::Multi(sel)
    }
}

/// Filter key to value. Keys holding their default are absent.
pub type Filters = BTreeMap<String, FilterValue>;

/// Staged and applied filter snapshots over one schema.
#[derive(Debug, Clone)]
pub struct FilterCodec {
    schema: Arc<FilterSchema>,
    staged: Filters,
    applied: Filters,
}

impl FilterCodec {
    pub fn new(schema: Arc<FilterSchema>) -> Self {
        Self {
            schema,
            staged: Filters::new(),
            applied: Filters::new(),
        }
    }

    /// Both snapshots start from what the URL currently says.
    pub fn from_query(schema: Arc<FilterSchema>, query: &str) -> Self {
        let applied = schema.decode(query);
        Self {
            staged: applied.clone(),
            applied,
            schema,
        }
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    pub fn staged(&self) -> &Filters {
        &self.staged
    }

    pub fn applied(&self) -> &Filters {
        &self.applied
    }

    /// Staged value for `key`, or the schema default when unset.
    pub fn get_filter(&self, key: &str) -> FilterValue {
        let fallback = self
            .schema
            .def(key)
            .map(FilterDef::default_value)
            .unwrap_or_else(|| FilterValue::Scalar(String::new()));
        self.get_filter_or(key, fallback)
    }

    pub fn get_filter_or(&self, key: &str, default: FilterValue) -> FilterValue {
        self.staged.get(key).cloned().unwrap_or(default)
    }

    /// Scalars replace. Multi-value filters toggle when handed a single
    /// item and replace when handed a whole selection.
    ///
    /// Values are normalized on write: surrounding whitespace is trimmed,
    /// and a value the key's rule rejects (or the default) unsets the key,
    /// so [`get_filter`](Self::get_filter) then returns the default.
    pub fn set_filter(&mut self, key: &str, value: impl Into<FilterValue>) {
        let Some(def) = self.schema.def(key) else {
            debug!(key, "ignoring unknown filter key");
            return;
        };

        let value = match (&def.kind, value.into()) {
            (FilterKind::Multi { .. }, FilterValue::Scalar(item)) => {
                let mut sel = self
                    .staged
                    .get(key)
                    .and_then(FilterValue::as_selection)
                    .cloned()
                    .unwrap_or_default();
                sel.toggle(item.trim());
                FilterValue::Multi(sel)
            }
            (_, value) => value,
        };

        match def.normalize(value) {
            Some(v) => {
                self.staged.insert(key.to_string(), v);
            }
            None => {
                self.staged.remove(key);
            }
        }
    }

    /// Toggle one element of a multi-value filter.
    pub fn toggle(&mut self, key: &str, item: &str) {
        if matches!(
            self.schema.def(key).map(|d| &d.kind),
            Some(FilterKind::Multi { .. })
        ) {
            self.set_filter(key, item);
        }
    }

    /// Number of staged keys that differ from their default.
    pub fn count(&self) -> usize {
        self.staged
            .iter()
            .filter(|(key, value)| {
                self.schema
                    .def(key)
                    .is_some_and(|def| !def.is_default(value))
            })
            .count()
    }

    /// Replace the staged snapshot with a decoded query (e.g. a submitted
    /// form). Applied is untouched.
    pub fn stage_query(&mut self, query: &str) {
        self.staged = self.schema.decode(query);
    }

    /// Commit staged filters and return the query string to navigate to.
    pub fn save_filters(&mut self) -> String {
        self.applied = self.staged.clone();
        self.schema.encode(&self.applied)
    }

    /// Reset staged filters to their defaults.
    pub fn clear_filters(&mut self) {
        self.staged.clear();
    }

    pub fn has_pending_changes(&self) -> bool {
        self.staged != self.applied
    }

    /// Query string of the applied snapshot.
    pub fn applied_query(&self) -> String {
        self.schema.encode(&self.applied)
    }

    /// Applied filters as upstream request parameters.
    pub fn applied_pairs(&self) -> Vec<(String, String)> {
        self.schema.to_pairs(&self.applied)
    }
}
