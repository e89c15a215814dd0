use std::collections::HashMap;

pub const DATA_MODEL: &str = "DataModel";
pub const DATA_CLASS: &str = "DataClass";
pub const DATA_ELEMENT: &str = "DataElement";

/// Path prefix mappings published by the service (`/path/prefixMappings`).
const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("ann", "Annotation"),
    ("api", "ApiProperty"),
    ("auth", "Authority"),
    ("cl", "Classifier"),
    ("cs", "CodeSet"),
    ("cu", "CatalogueUser"),
    ("dc", DATA_CLASS),
    ("dcc", "DataClassComponent"),
    ("de", DATA_ELEMENT),
    ("dec", "DataElementComponent"),
    ("df", "DataFlow"),
    ("dm", DATA_MODEL),
    ("dt", "EnumerationType"),
    ("ed", "Edit"),
    ("ev", "EnumerationValue"),
    ("fo", "Folder"),
    ("gr", "GroupRole"),
    ("md", "Metadata"),
    ("rde", "ReferenceDataElement"),
    ("rdm", "ReferenceDataModel"),
    ("rdt", "ReferenceEnumerationType"),
    ("rdv", "ReferenceDataValue"),
    ("rev", "ReferenceEnumerationValue"),
    ("rf", "ReferenceFile"),
    ("rr", "RuleRepresentation"),
    ("rsm", "ReferenceSummaryMetadata"),
    ("rsmr", "ReferenceSummaryMetadataReport"),
    ("ru", "Rule"),
    ("sl", "SemanticLink"),
    ("sm", "SummaryMetadata"),
    ("smr", "SummaryMetadataReport"),
    ("te", "Terminology"),
    ("tm", "Term"),
    ("tr", "TermRelationship"),
    ("trt", "TermRelationshipType"),
    ("ug", "UserGroup"),
    ("uif", "UserImageFile"),
    ("vf", "VersionedFolder"),
    ("vl", "VersionLink"),
];

/// Short type code -> canonical domain type name. Built once, then only read.
#[derive(Debug, Clone)]
pub struct TypeCodeTable {
    codes: HashMap<String, String>,
}

impl TypeCodeTable {
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_PREFIXES.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            codes: pairs
                .into_iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn domain_type(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for TypeCodeTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Catalogue items that have an id-based address.
///
/// The service fetches these by `/<collection>/<id>`; every other domain type
/// contributes nothing to an id-based address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressableKind {
    DataModel,
    DataClass,
    DataElement,
}

impl AddressableKind {
    pub fn from_domain_type(domain_type: &str) -> Option<Self> {
        match domain_type {
            DATA_MODEL => Some(Self::DataModel),
            DATA_CLASS => Some(Self::DataClass),
            DATA_ELEMENT => Some(Self::DataElement),
            _ => None,
        }
    }

    pub fn collection(self) -> &'static str {
        match self {
            Self::DataModel => "dataModels",
            Self::DataClass => "dataClasses",
            Self::DataElement => "dataElements",
        }
    }

    pub fn id_fragment(self, id: &str) -> String {
        format!("/{}/{}", self.collection(), id)
    }
}
