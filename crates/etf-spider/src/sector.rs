//! Sector-weight normalization.
//!
//! Providers disagree on how sector allocations are shaped: some return one
//! object of `sector -> weight`, some a list of single-pair objects, some
//! nothing at all. Everything funnels through [`normalize`] into one sorted
//! table before printing or charting.

use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// One sector allocation; `weight` is a fraction, expected (but not
/// guaranteed by upstream) to sit in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorWeight {
    pub sector: String,
    pub weight: f64,
}

/// Sector allocations, unique by sector name, descending by weight.
pub type SectorWeightTable = Vec<SectorWeight>;

#[derive(Debug, thiserror::Error)]
pub enum SectorError {
    #[error("sector payload must be an object or an array, found {found}")]
    InvalidShape { found: &'static str },
}

/// The payload shapes upstream APIs hand us, classified once at entry.
enum Shape<'a> {
    Absent,
    Table(&'a serde_json::Map<String, Value>),
    Entries(&'a [Value]),
}

fn classify(raw: Option<&Value>) -> Result<Shape<'_>, SectorError> {
    match raw {
        None | Some(Value::Null) => Ok(Shape::Absent),
        Some(Value::Object(table)) => Ok(Shape::Table(table)),
        Some(Value::Array(entries)) => Ok(Shape::Entries(entries)),
        Some(Value::Bool(_)) => Err(SectorError::InvalidShape { found: "a bool" }),
        Some(Value::Number(_)) => Err(SectorError::InvalidShape { found: "a number" }),
        Some(Value::String(_)) => Err(SectorError::InvalidShape { found: "a string" }),
    }
}

/// Normalize a raw sector-weight payload into a canonical table.
///
/// Absent or empty input yields an empty table; some funds simply have no
/// sector breakdown and that is not a failure. Malformed entries (non-object
/// list elements, non-numeric weights, empty sector names) are logged and
/// skipped so one bad row never loses the rest. A top-level scalar is the
/// only hard error.
///
/// Duplicate sector names keep their first position in the table but take
/// the last weight seen. The final sort is stable and descending by weight,
/// so equal weights stay in encounter order.
pub fn normalize(raw: Option<&Value>) -> Result<SectorWeightTable, SectorError> {
    let mut table: Vec<SectorWeight> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    match classify(raw)? {
        Shape::Absent => return Ok(table),
        Shape::Table(pairs) => {
            for (sector, value) in pairs {
                upsert(&mut table, &mut index, sector, value);
            }
        }
        Shape::Entries(entries) => {
            for entry in entries {
                let Value::Object(pairs) = entry else {
                    warn!("skipping non-object sector entry: {entry}");
                    continue;
                };
                for (sector, value) in pairs {
                    upsert(&mut table, &mut index, sector, value);
                }
            }
        }
    }

    // stable sort; ties keep encounter order
    table.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    Ok(table)
}

fn upsert(
    table: &mut Vec<SectorWeight>,
    index: &mut HashMap<String, usize>,
    sector: &str,
    value: &Value,
) {
    if sector.is_empty() {
        warn!("skipping sector entry with an empty name");
        return;
    }

    let weight = match value.as_f64() {
        Some(weight) => weight,
        None => {
            warn!("skipping non-numeric weight for sector {sector:?}: {value}");
            return;
        }
    };

    if !(0.0..=1.0).contains(&weight) {
        debug!("sector {sector:?} weight {weight} falls outside [0.0, 1.0]");
    }

    match index.get(sector) {
        // last seen wins, first position kept
        Some(&at) => table[at].weight = weight,
        None => {
            index.insert(sector.to_string(), table.len());
            table.push(SectorWeight {
                sector: sector.to_string(),
                weight,
            });
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
// tests
/////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(table: &SectorWeightTable) -> Vec<(&str, f64)> {
        table
            .iter()
            .map(|row| (row.sector.as_str(), row.weight))
            .collect()
    }

    #[test]
    fn absent_and_empty_inputs_yield_empty_tables() {
        assert!(normalize(None).unwrap().is_empty());
        assert!(normalize(Some(&Value::Null)).unwrap().is_empty());
        assert!(normalize(Some(&json!([]))).unwrap().is_empty());
        assert!(normalize(Some(&json!({}))).unwrap().is_empty());
    }

    #[test]
    fn entry_list_sorts_descending_by_weight() {
        let raw = json!([{"A": 0.1}, {"B": 0.5}, {"C": 0.3}]);
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("B", 0.5), ("C", 0.3), ("A", 0.1)]);
    }

    #[test]
    fn mapping_input_passes_through() {
        let raw = json!({"A": 0.6, "B": 0.4});
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("A", 0.6), ("B", 0.4)]);
    }

    #[test]
    fn duplicate_sector_takes_last_weight_seen() {
        let raw = json!([{"Tech": 0.3}, {"Health": 0.2}, {"Tech": 0.1}]);
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("Health", 0.2), ("Tech", 0.1)]);

        // no duplicate names survive
        let names: std::collections::HashSet<_> =
            table.iter().map(|row| row.sector.as_str()).collect();
        assert_eq!(names.len(), table.len());
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let raw = json!([{"A": 0.1}, "garbage", {"B": 0.2}]);
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("B", 0.2), ("A", 0.1)]);

        let raw = json!([{"A": 0.1}, {"B": "heavy"}, {"": 0.4}, {"C": 0.2}]);
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("C", 0.2), ("A", 0.1)]);
    }

    #[test]
    fn multi_pair_entries_are_flattened() {
        let raw = json!([{"A": 0.1, "B": 0.5}, {"C": 0.3}]);
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("B", 0.5), ("C", 0.3), ("A", 0.1)]);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let raw = json!([{"Z": 0.2}, {"M": 0.2}, {"A": 0.2}]);
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("Z", 0.2), ("M", 0.2), ("A", 0.2)]);
    }

    #[test]
    fn out_of_range_weights_pass_through_untouched() {
        let raw = json!({"Technology": 25.5, "Utilities": -0.5});
        let table = normalize(Some(&raw)).unwrap();
        assert_eq!(pairs(&table), vec![("Technology", 25.5), ("Utilities", -0.5)]);
    }

    #[test]
    fn scalar_top_level_is_an_invalid_shape() {
        for raw in [json!(42), json!("Technology"), json!(true)] {
            let err = normalize(Some(&raw)).unwrap_err();
            assert!(matches!(err, SectorError::InvalidShape { .. }));
        }
    }

    #[test]
    fn normalizing_the_canonical_form_is_stable() {
        let raw = json!([{"Tech": 0.4}, {"Health": 0.35}, {"Tech": 0.2}, {"Energy": 0.45}]);
        let once = normalize(Some(&raw)).unwrap();

        // round-trip through the canonical mapping form
        let canonical = Value::Object(
            once.iter()
                .map(|row| (row.sector.clone(), json!(row.weight)))
                .collect(),
        );
        let twice = normalize(Some(&canonical)).unwrap();

        assert_eq!(once, twice);
    }
}
