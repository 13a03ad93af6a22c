//! Query DSL evaluation for the memory engine.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::BackendError;

/// Field types taken from an index mapping, keyed by dotted path.
#[derive(Debug, Default, Clone)]
pub(crate) struct Mapping {
    fields: HashMap<String, String>,
}

impl Mapping {
    /// Reads `mappings.properties` from an index creation body.
    pub(crate) fn from_body(body: &Value) -> Self {
        let mut fields = HashMap::new();
        if let Some(properties) = body
            .get("mappings")
            .and_then(|m| m.get("properties"))
            .and_then(Value::as_object)
        {
            collect_fields("", properties, &mut fields);
        }
        Self { fields }
    }

    fn field_type(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    /// Whether a field is matched as a single exact term rather than analyzed text.
    fn is_exact(&self, path: &str) -> bool {
        matches!(
            self.field_type(path),
            Some("keyword" | "integer" | "long" | "date" | "boolean" | "double")
        )
    }
}

fn collect_fields(prefix: &str, properties: &Map<String, Value>, fields: &mut HashMap<String, String>) {
    for (name, definition) in properties {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        if let Some(kind) = definition.get("type").and_then(Value::as_str) {
            fields.insert(path.clone(), kind.to_string());
        }
        if let Some(nested) = definition.get("properties").and_then(Value::as_object) {
            collect_fields(&path, nested, fields);
        }
    }
}

/// A resolved sort clause.
#[derive(Debug, Clone)]
pub(crate) struct SortKey {
    pub(crate) field: String,
    pub(crate) descending: bool,
}

fn unsupported(message: impl Into<String>) -> BackendError {
    BackendError::QueryError {
        message: message.into(),
    }
}

/// Evaluates a query clause against one document.
///
/// Returns `None` when the document does not match, or its score.
pub(crate) fn evaluate(
    clause: &Value,
    id: &str,
    document: &Value,
    mapping: &Mapping,
) -> Result<Option<f64>, BackendError> {
    let object = clause
        .as_object()
        .ok_or_else(|| unsupported("query clause must be an object"))?;
    if object.len() != 1 {
        return Err(unsupported(format!(
            "query clause must have exactly one key, found {}",
            object.len()
        )));
    }
    let Some((kind, body)) = object.iter().next() else {
        return Err(unsupported("empty query clause"));
    };

    match kind.as_str() {
        "match_all" => Ok(Some(1.0)),
        "ids" => {
            let values = body
                .get("values")
                .and_then(Value::as_array)
                .ok_or_else(|| unsupported("ids query requires 'values'"))?;
            let found = values.iter().any(|v| v.as_str() == Some(id));
            Ok(found.then_some(1.0))
        }
        "exists" => {
            let field = body
                .get("field")
                .and_then(Value::as_str)
                .ok_or_else(|| unsupported("exists query requires 'field'"))?;
            let present = lookup(document, field).is_some_and(|v| !v.is_null());
            Ok(present.then_some(1.0))
        }
        "term" => {
            let (field, expected) = single_field(body, "value")?;
            let matched = field_terms(document, field)
                .iter()
                .any(|term| Some(term.as_str()) == value_as_term(expected).as_deref());
            Ok(matched.then_some(1.0))
        }
        "match" => {
            let (field, query) = single_field(body, "query")?;
            let query = value_as_term(query)
                .ok_or_else(|| unsupported("match query must be a scalar"))?;
            Ok(match_field(document, field, &query, mapping))
        }
        "multi_match" => evaluate_multi_match(body, document, mapping),
        "bool" => evaluate_bool(body, id, document, mapping),
        other => Err(unsupported(format!("unsupported query clause '{}'", other))),
    }
}

fn evaluate_multi_match(
    body: &Value,
    document: &Value,
    mapping: &Mapping,
) -> Result<Option<f64>, BackendError> {
    let query = body
        .get("query")
        .and_then(value_as_term)
        .ok_or_else(|| unsupported("multi_match requires 'query'"))?;
    let fields = body
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| unsupported("multi_match requires 'fields'"))?;
    let phrase_prefix = match body.get("type").and_then(Value::as_str) {
        None | Some("best_fields") => false,
        Some("phrase_prefix") => true,
        Some(other) => {
            return Err(unsupported(format!("unsupported multi_match type '{}'", other)));
        }
    };

    let mut best: Option<f64> = None;
    for field in fields.iter().filter_map(Value::as_str) {
        let score = if phrase_prefix {
            match_phrase_prefix(document, field, &query)
        } else {
            match_field(document, field, &query, mapping)
        };
        best = match (best, score) {
            (Some(b), Some(s)) => Some(b.max(s)),
            (b, s) => b.or(s),
        };
    }
    Ok(best)
}

fn evaluate_bool(
    body: &Value,
    id: &str,
    document: &Value,
    mapping: &Mapping,
) -> Result<Option<f64>, BackendError> {
    let must = clause_list(body, "must");
    let filter = clause_list(body, "filter");
    let should = clause_list(body, "should");
    let must_not = clause_list(body, "must_not");

    let mut score = 0.0;

    for clause in &must {
        match evaluate(clause, id, document, mapping)? {
            Some(s) => score += s,
            None => return Ok(None),
        }
    }

    for clause in &filter {
        if evaluate(clause, id, document, mapping)?.is_none() {
            return Ok(None);
        }
    }

    for clause in &must_not {
        if evaluate(clause, id, document, mapping)?.is_some() {
            return Ok(None);
        }
    }

    let mut matched_should = 0;
    for clause in &should {
        if let Some(s) = evaluate(clause, id, document, mapping)? {
            score += s;
            matched_should += 1;
        }
    }

    // Without must/filter clauses at least one should clause has to match
    if must.is_empty() && filter.is_empty() && !should.is_empty() && matched_should == 0 {
        return Ok(None);
    }

    Ok(Some(if score > 0.0 { score } else { 1.0 }))
}

/// Bool clauses may be a single object or an array of objects.
fn clause_list<'a>(body: &'a Value, key: &str) -> Vec<&'a Value> {
    match body.get(key) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single @ Value::Object(_)) => vec![single],
        _ => Vec::new(),
    }
}

/// Reads `{ "<field>": <value> }` or `{ "<field>": { "<inner>": <value> } }`.
fn single_field<'a>(body: &'a Value, inner: &str) -> Result<(&'a str, &'a Value), BackendError> {
    let object = body
        .as_object()
        .filter(|o| o.len() == 1)
        .ok_or_else(|| unsupported("expected a single field"))?;
    let Some((field, value)) = object.iter().next() else {
        return Err(unsupported("expected a single field"));
    };
    let value = match value {
        Value::Object(options) => options
            .get(inner)
            .ok_or_else(|| unsupported(format!("missing '{}' for field '{}'", inner, field)))?,
        other => other,
    };
    Ok((field.as_str(), value))
}

fn match_field(document: &Value, field: &str, query: &str, mapping: &Mapping) -> Option<f64> {
    let terms = field_terms(document, field);
    if terms.is_empty() {
        return None;
    }

    if mapping.is_exact(field) {
        return terms.iter().any(|t| t == query).then_some(1.0);
    }

    let query_tokens = tokenize(query);
    let field_tokens: Vec<String> = terms.iter().flat_map(|t| tokenize(t)).collect();
    let matched = query_tokens
        .iter()
        .filter(|q| field_tokens.contains(q))
        .count();
    (matched > 0).then_some(matched as f64)
}

/// Matches consecutive query tokens, the last one as a prefix.
fn match_phrase_prefix(document: &Value, field: &str, query: &str) -> Option<f64> {
    let query_tokens = tokenize(query);
    let Some((last, leading)) = query_tokens.split_last() else {
        return None;
    };

    field_terms(document, field).iter().find_map(|term| {
        let tokens = tokenize(term);
        let width = query_tokens.len();
        if tokens.len() < width {
            return None;
        }
        (0..=tokens.len() - width)
            .any(|start| {
                leading
                    .iter()
                    .zip(&tokens[start..])
                    .all(|(q, t)| q == t)
                    && tokens[start + width - 1].starts_with(last.as_str())
            })
            .then_some(width as f64)
    })
}

/// Lowercases and splits on anything that is not alphanumeric.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Collects the scalar values at a dotted path as strings.
fn field_terms(document: &Value, field: &str) -> Vec<String> {
    let mut terms = Vec::new();
    if let Some(value) = lookup(document, field) {
        push_terms(value, &mut terms);
    }
    terms
}

fn push_terms(value: &Value, terms: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| push_terms(v, terms)),
        other => {
            if let Some(term) = value_as_term(other) {
                terms.push(term);
            }
        }
    }
}

fn value_as_term(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Resolves a dotted path inside a document.
pub(crate) fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

/// Parses a `sort` array of `{ "<field>": { "order": "asc|desc" } }`,
/// `{ "<field>": "asc|desc" }` or bare field names.
pub(crate) fn parse_sort(sort: &Value) -> Result<Vec<SortKey>, BackendError> {
    let items: Vec<&Value> = match sort {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(field) => Ok(SortKey {
                field: field.clone(),
                descending: false,
            }),
            Value::Object(object) if object.len() == 1 => {
                let Some((field, options)) = object.iter().next() else {
                    return Err(unsupported("empty sort clause"));
                };
                let order = match options {
                    Value::String(order) => Some(order.as_str()),
                    Value::Object(o) => o.get("order").and_then(Value::as_str),
                    _ => None,
                };
                let descending = match order {
                    None | Some("asc") => false,
                    Some("desc") => true,
                    Some(other) => return Err(unsupported(format!("unknown sort order '{}'", other))),
                };
                Ok(SortKey {
                    field: field.clone(),
                    descending,
                })
            }
            _ => Err(unsupported("unsupported sort clause")),
        })
        .collect()
}

/// Orders numbers numerically and everything else by its string form.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => value_as_term(left).cmp(&value_as_term(right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping() -> Mapping {
        Mapping::from_body(&json!({
            "mappings": {
                "properties": {
                    "id": { "type": "integer" },
                    "phrase": { "type": "text" },
                    "status": { "type": "keyword" },
                    "translations": { "type": "object" }
                }
            }
        }))
    }

    fn doc() -> Value {
        json!({
            "id": 1,
            "phrase": "Hello, world!",
            "status": "active",
            "translations": { "fr": "Bonjour, le monde!", "es": "¡Hola, mundo!" }
        })
    }

    fn eval(clause: Value) -> Option<f64> {
        evaluate(&clause, "1", &doc(), &mapping()).unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("¡Hola, mundo!"), vec!["hola", "mundo"]);
        assert_eq!(tokenize("nonexistent-xyz"), vec!["nonexistent", "xyz"]);
        assert!(tokenize("!!").is_empty());
    }

    #[test]
    fn test_mapping_collects_types() {
        let mapping = mapping();
        assert!(mapping.is_exact("status"));
        assert!(mapping.is_exact("id"));
        assert!(!mapping.is_exact("phrase"));
        assert!(!mapping.is_exact("translations.fr"));
    }

    #[test]
    fn test_ids_and_exists() {
        assert!(eval(json!({ "ids": { "values": ["1"] } })).is_some());
        assert!(eval(json!({ "ids": { "values": ["2"] } })).is_none());
        assert!(eval(json!({ "exists": { "field": "translations.fr" } })).is_some());
        assert!(eval(json!({ "exists": { "field": "translations.de" } })).is_none());
    }

    #[test]
    fn test_text_match_is_analyzed() {
        assert!(eval(json!({ "match": { "phrase": "WORLD" } })).is_some());
        assert!(eval(json!({ "match": { "phrase": "wor" } })).is_none());
        assert!(eval(json!({ "match": { "phrase": { "query": "hello" } } })).is_some());
    }

    #[test]
    fn test_term_is_exact() {
        assert!(eval(json!({ "term": { "status": "active" } })).is_some());
        assert!(eval(json!({ "term": { "id": { "value": 1 } } })).is_some());
        assert!(eval(json!({ "term": { "status": "Active" } })).is_none());
    }

    #[test]
    fn test_phrase_prefix() {
        let query = |q: &str| {
            json!({
                "multi_match": {
                    "query": q,
                    "type": "phrase_prefix",
                    "fields": ["phrase", "translations.fr", "translations.es"]
                }
            })
        };

        assert!(eval(query("Hello")).is_some());
        assert!(eval(query("hello, wo")).is_some());
        assert!(eval(query("bonjour le")).is_some());
        assert!(eval(query("world hello")).is_none());
        assert!(eval(query("ello")).is_none());
        assert!(eval(query("")).is_none());
    }

    #[test]
    fn test_bool_should_requires_one_match() {
        let clause = json!({
            "bool": {
                "should": [
                    { "match": { "status": "pending" } },
                    { "match": { "phrase": "goodbye" } }
                ]
            }
        });
        assert!(eval(clause).is_none());

        let clause = json!({
            "bool": {
                "should": [
                    { "match": { "status": "active" } },
                    { "match": { "phrase": "goodbye" } }
                ]
            }
        });
        assert!(eval(clause).is_some());
    }

    #[test]
    fn test_bool_must_and_must_not() {
        let clause = json!({
            "bool": {
                "must": [
                    { "ids": { "values": ["1"] } },
                    { "exists": { "field": "translations.es" } }
                ],
                "must_not": { "term": { "status": "spam" } }
            }
        });
        assert!(eval(clause).is_some());

        let clause = json!({
            "bool": {
                "must": [{ "ids": { "values": ["1"] } }],
                "must_not": [{ "term": { "status": "active" } }]
            }
        });
        assert!(eval(clause).is_none());
    }

    #[test]
    fn test_parse_sort_forms() {
        let keys = parse_sort(&json!([
            { "createdAt": { "order": "desc" } },
            { "status": "asc" },
            "id"
        ]))
        .unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys[0].descending);
        assert!(!keys[1].descending);
        assert_eq!(keys[2].field, "id");

        assert!(parse_sort(&json!([{ "id": { "order": "up" } }])).is_err());
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(
            compare_values(&json!("2024-05-24T10:15:00Z"), &json!("2024-05-23T15:58:35Z")),
            Ordering::Greater
        );
    }
}
