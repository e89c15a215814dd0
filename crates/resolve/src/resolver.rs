use catalogue::wire::PathLookup;
use catalogue::{AddressableKind, ApiResponse, Breadcrumb, CatalogueClient, CatalogueError, TypeCodeTable};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::path::{PathError, PathSegment, parse_path};

/// Outcome of resolving one path expression.
///
/// Not-found and mismatching paths are ordinary values with
/// `url_found == false`; only bad input and transport failures are errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPath {
    pub url_found: bool,
    /// Finalisation state of the model at the root of the path.
    pub model_finalised: bool,
    pub id_based_url: Option<String>,
    pub status_code: u16,
    pub reason: String,
}

impl ResolvedPath {
    fn unresolved(response: &ApiResponse) -> Self {
        Self {
            url_found: false,
            model_finalised: false,
            id_based_url: None,
            status_code: response.status_code,
            reason: response.reason.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// How a breadcrumb trail compared against a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailMatch {
    Matched {
        model_finalised: bool,
        id_based_url: String,
    },
    LengthMismatch {
        segments: usize,
        breadcrumbs: usize,
    },
    SegmentMismatch {
        index: usize,
    },
    /// Every step matched but the entity itself has no id-based address.
    Unaddressable,
}

pub struct PathResolver {
    client: CatalogueClient,
    table: Arc<TypeCodeTable>,
}

impl PathResolver {
    pub fn new(client: CatalogueClient, table: Arc<TypeCodeTable>) -> Self {
        Self { client, table }
    }

    /// Look a path expression up and confirm the service's answer matches it
    /// at every level before trusting its identifiers.
    pub async fn resolve(&self, path_expression: &str) -> Result<ResolvedPath, ResolveError> {
        let segments = parse_path(path_expression, &self.table)?;
        debug!(path = path_expression, segments = segments.len(), "Parsed path expression");

        let response = self.client.find_by_path(path_expression).await?;
        let mut resolved = ResolvedPath::unresolved(&response);

        if !response.is_success() {
            debug!(
                path = path_expression,
                status = response.status_code,
                "Path lookup returned no entity"
            );
            return Ok(resolved);
        }

        let lookup: PathLookup =
            serde_json::from_str(&response.full_text).map_err(|source| CatalogueError::Decode {
                endpoint: format!("/dataModels/path/{}", path_expression),
                source,
            })?;

        let Some(trail) = breadcrumb_trail(lookup) else {
            warn!(path = path_expression, "Path lookup response has no breadcrumbs");
            return Ok(resolved);
        };

        match match_trail(&segments, &trail) {
            TrailMatch::Matched {
                model_finalised,
                id_based_url,
            } => {
                info!(path = path_expression, %id_based_url, "Path resolved");
                resolved.url_found = true;
                resolved.model_finalised = model_finalised;
                resolved.id_based_url = Some(id_based_url);
            }
            TrailMatch::LengthMismatch {
                segments,
                breadcrumbs,
            } => {
                warn!(
                    path = path_expression,
                    segments, breadcrumbs, "Path length did not match breadcrumb length"
                );
            }
            TrailMatch::SegmentMismatch { index } => {
                warn!(
                    path = path_expression,
                    index,
                    expected_type = %segments[index].domain_type,
                    expected_label = %segments[index].entity_name,
                    found_type = %trail[index].domain_type,
                    found_label = %trail[index].label,
                    "Service returned a different entity than the path names"
                );
            }
            TrailMatch::Unaddressable => {
                warn!(path = path_expression, "Path matched but has no id-based address");
            }
        }

        Ok(resolved)
    }
}

/// Ancestors followed by the entity itself, or `None` when the service left
/// the breadcrumbs out.
pub fn breadcrumb_trail(lookup: PathLookup) -> Option<Vec<Breadcrumb>> {
    let leaf = lookup.leaf();
    let mut trail = lookup.breadcrumbs?;
    trail.push(leaf);
    Some(trail)
}

/// Walk `segments` and `trail` in lock-step. Every step must agree on both
/// domain type and label.
pub fn match_trail(segments: &[PathSegment], trail: &[Breadcrumb]) -> TrailMatch {
    if segments.len() != trail.len() {
        return TrailMatch::LengthMismatch {
            segments: segments.len(),
            breadcrumbs: trail.len(),
        };
    }

    let mut model_finalised = None;
    let mut fragments = Vec::with_capacity(trail.len());
    let mut leaf_addressable = false;

    for (index, (segment, crumb)) in segments.iter().zip(trail).enumerate() {
        if segment.domain_type != crumb.domain_type || segment.entity_name != crumb.label {
            return TrailMatch::SegmentMismatch { index };
        }

        // TODO: folders and terminologies need their own fragments once paths outside data models are resolved.
        let kind = AddressableKind::from_domain_type(&crumb.domain_type);
        leaf_addressable = kind.is_some();
        if let Some(kind) = kind {
            if kind == AddressableKind::DataModel && model_finalised.is_none() {
                model_finalised = Some(crumb.finalised.unwrap_or(false));
            }
            fragments.push(kind.id_fragment(&crumb.id));
        }
    }

    // Ancestor fragments alone would address the parent, not the entity.
    if !leaf_addressable {
        return TrailMatch::Unaddressable;
    }

    match id_based_address(&fragments) {
        Some(id_based_url) => TrailMatch::Matched {
            model_finalised: model_finalised.unwrap_or(false),
            id_based_url,
        },
        None => TrailMatch::Unaddressable,
    }
}

/// The service fetches by `<model>/<parent>/<item>`: root fragment plus the
/// last two. Shallower paths use each fragment once.
pub fn id_based_address(fragments: &[String]) -> Option<String> {
    let last = fragments.len().checked_sub(1)?;
    let mut indices = vec![0, last.saturating_sub(1), last];
    indices.dedup();

    Some(indices.into_iter().map(|i| fragments[i].as_str()).collect())
}
