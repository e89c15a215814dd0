use catalogue::TypeCodeTable;
use serde::Serialize;

/// One `code:name` step of a path expression, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub type_code: String,
    pub entity_name: String,
    /// Canonical type for `type_code`, e.g. `DataClass` for `dc`.
    pub domain_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Path expression is empty")]
    Empty,

    #[error("Path segment '{segment}' has no ':' between type code and name")]
    MissingSeparator { segment: String },

    #[error("Unknown type code '{code}' in path segment '{segment}'")]
    UnknownTypeCode { code: String, segment: String },
}

/// Undo the `%3A` / `%7C` escaping accepted in path expressions.
pub fn decode_path(path_expression: &str) -> String {
    path_expression
        .replace("%3A", ":")
        .replace("%3a", ":")
        .replace("%7C", "|")
        .replace("%7c", "|")
}

/// Split `dm:Model|dc:Class|de:Element` into ordered segments.
pub fn parse_path(path_expression: &str, table: &TypeCodeTable) -> Result<Vec<PathSegment>, PathError> {
    let decoded = decode_path(path_expression);
    let decoded = decoded.trim_start_matches('/');
    if decoded.is_empty() {
        return Err(PathError::Empty);
    }

    decoded
        .split('|')
        .map(|segment| parse_segment(segment, table))
        .collect()
}

fn parse_segment(segment: &str, table: &TypeCodeTable) -> Result<PathSegment, PathError> {
    let (code, name) = segment
        .split_once(':')
        .ok_or_else(|| PathError::MissingSeparator {
            segment: segment.to_string(),
        })?;

    let domain_type = table
        .domain_type(code)
        .ok_or_else(|| PathError::UnknownTypeCode {
            code: code.to_string(),
            segment: segment.to_string(),
        })?;

    Ok(PathSegment {
        type_code: code.to_string(),
        entity_name: name.to_string(),
        domain_type: domain_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_in_order() {
        let table = TypeCodeTable::standard();
        let segments =
            parse_path("dm:maurodatamapper|dc:core|dc:annotation|de:last_updated", &table).unwrap();

        let steps: Vec<(&str, &str)> = segments
            .iter()
            .map(|s| (s.domain_type.as_str(), s.entity_name.as_str()))
            .collect();
        assert_eq!(
            steps,
            vec![
                ("DataModel", "maurodatamapper"),
                ("DataClass", "core"),
                ("DataClass", "annotation"),
                ("DataElement", "last_updated"),
            ]
        );
    }

    #[test]
    fn test_encoded_matches_plain() {
        let table = TypeCodeTable::standard();
        let plain = parse_path("dm:Model A|dc:Class B|de:Element C", &table).unwrap();
        let encoded = parse_path("dm%3AModel A%7Cdc%3AClass B%7Cde%3AElement C", &table).unwrap();
        let lower = parse_path("dm%3aModel A%7cdc%3aClass B%7cde%3aElement C", &table).unwrap();
        assert_eq!(plain, encoded);
        assert_eq!(plain, lower);
    }

    #[test]
    fn test_name_keeps_later_colons() {
        let table = TypeCodeTable::standard();
        let segments = parse_path("dm:Model|de:time:utc", &table).unwrap();
        assert_eq!(segments[1].type_code, "de");
        assert_eq!(segments[1].entity_name, "time:utc");
    }

    #[test]
    fn test_single_segment() {
        let table = TypeCodeTable::standard();
        let segments = parse_path("/dm:ModelA", &table).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].domain_type, "DataModel");
    }

    #[test]
    fn test_malformed_paths() {
        let table = TypeCodeTable::standard();

        assert_eq!(parse_path("", &table), Err(PathError::Empty));
        assert!(matches!(
            parse_path("dm:ModelA|ClassA", &table),
            Err(PathError::MissingSeparator { .. })
        ));
        assert!(matches!(
            parse_path("dm:ModelA|zz:ClassA", &table),
            Err(PathError::UnknownTypeCode { code, .. }) if code == "zz"
        ));
        assert!(matches!(
            parse_path("dm:ModelA||dc:ClassA", &table),
            Err(PathError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn test_injected_table() {
        let table = TypeCodeTable::from_pairs([("m", "DataModel")]);
        assert!(parse_path("m:ModelA", &table).is_ok());
        assert!(parse_path("dm:ModelA", &table).is_err());
    }
}
