//! License banner prepended to bundled outputs.

use chrono::Datelike;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Package metadata shown in the banner, read from the same manifest as the exports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMeta {
  /// Package name.
  #[serde(default)]
  pub name: Option<String>,
  /// One-line package description.
  #[serde(default)]
  pub description: Option<String>,
  /// Author, either a plain string or the `name` of an author object.
  #[serde(default, deserialize_with = "author_name")]
  pub author: Option<String>,
  /// SPDX license identifier.
  #[serde(default)]
  pub license: Option<String>,
  /// First year of the copyright range.
  #[serde(default)]
  pub since: Option<i32>,
}

impl PackageMeta {
  /// Interpret an already parsed manifest value.
  pub fn from_value(value: Value) -> serde_json::Result<Self> {
    serde_json::from_value(value)
  }
}

fn author_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(match value {
    Some(Value::String(name)) => Some(name),
    Some(Value::Object(author)) => author
      .get("name")
      .and_then(Value::as_str)
      .map(str::to_string),
    _ => None,
  })
}

/// Current calendar year in local time.
pub fn current_year() -> i32 {
  chrono::Local::now().year()
}

/// Copyright year range: `2021` in the first year, `2021 - 2024` afterwards.
pub fn date_range(since: i32, now: i32) -> String {
  if since == now {
    since.to_string()
  } else {
    format!("{since} - {now}")
  }
}

/// Render the `/**! ... */` banner. Missing fields are left out.
pub fn package_banner(meta: &PackageMeta, now: i32) -> String {
  let copyright = {
    let range = date_range(meta.since.unwrap_or(now), now);
    match meta.author.as_deref().filter(|author| !author.is_empty()) {
      Some(author) => format!("© {range} {author}"),
      None => format!("© {range}"),
    }
  };

  let lines = [
    meta.name.clone(),
    meta.description.clone(),
    Some(copyright),
    meta.license.as_ref().map(|license| format!("@license {license}")),
  ];

  let body: String = lines
    .into_iter()
    .flatten()
    .filter(|line| !line.is_empty())
    .map(|line| format!("\n * {line}"))
    .collect();
  format!("/**!{body}\n */")
}

/// Banner stamped with the current year.
pub fn banner_for(meta: &PackageMeta) -> String {
  package_banner(meta, current_year())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn meta() -> PackageMeta {
    PackageMeta::from_value(json!({
      "name": "@scope/focus",
      "description": "Focus management helpers",
      "author": { "name": "Jane Doe", "email": "jane@example.com" },
      "license": "MIT",
      "since": 2021,
      "exports": "./dist/index.js",
    }))
    .expect("meta parses")
  }

  #[test]
  fn renders_full_banner() {
    assert_eq!(
      package_banner(&meta(), 2024),
      "/**!\n * @scope/focus\n * Focus management helpers\n * © 2021 - 2024 Jane Doe\n * @license MIT\n */"
    );
  }

  #[test]
  fn single_year_range_in_first_year() {
    assert_eq!(date_range(2024, 2024), "2024");
    assert!(package_banner(&meta(), 2021).contains("© 2021 Jane Doe"));
  }

  #[test]
  fn omits_missing_fields() {
    let meta = PackageMeta {
      name: Some("pkg".into()),
      description: Some(String::new()),
      ..PackageMeta::default()
    };
    assert_eq!(package_banner(&meta, 2030), "/**!\n * pkg\n * © 2030\n */");
  }

  #[test]
  fn string_author_is_accepted() {
    let meta = PackageMeta::from_value(json!({ "author": "Jane Doe <jane@example.com>" }))
      .expect("meta parses");
    assert_eq!(meta.author.as_deref(), Some("Jane Doe <jane@example.com>"));
  }

  #[test]
  fn banner_for_uses_a_plausible_year() {
    assert!(banner_for(&meta()).starts_with("/**!\n * @scope/focus"));
    assert!(current_year() >= 2024);
  }
}
