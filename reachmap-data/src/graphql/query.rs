//! Wire types for the `listReaches` GraphQL query.
//!
//! Every field the API may omit or null is an [`Option`]. Conversion into
//! [`reachmap_core::Reach`] happens here so the core never sees wire shapes.

use reachmap_core::{Reach, ReachId, ReachPage, ReachPoi, SourceError, State};
use serde::{Deserialize, Serialize};

/// Query text issued for every page.
pub const LIST_REACHES_QUERY: &str = r"query listReaches($page: Int!, $per_page: Int!) {
    reaches(first: $per_page, page: $page) {
        paginatorInfo {
            hasMorePages
        }
        data {
            id
            river
            section
            ploc
            tloc
            geom
            class
            states {
                shortkey
                name
            }
            pois {
                name
                difficulty
                character
                rloc
            }
        }
    }
}";

/// POST body for a GraphQL request.
#[derive(Debug, Serialize)]
pub(crate) struct GraphqlRequest<'a> {
    pub(crate) query: &'a str,
    pub(crate) variables: PageVariables,
}

/// Variables bound to `$page` and `$per_page`.
#[derive(Debug, Serialize)]
pub(crate) struct PageVariables {
    pub(crate) page: u32,
    pub(crate) per_page: u32,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse {
    pub(crate) data: Option<ReachesData>,
    pub(crate) errors: Option<Vec<GraphqlErrorMessage>>,
}

/// A single entry of the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlErrorMessage {
    pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReachesData {
    pub(crate) reaches: Option<ReachConnection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReachConnection {
    #[serde(rename = "paginatorInfo")]
    pub(crate) paginator_info: PaginatorInfo,
    pub(crate) data: Option<Vec<WireReach>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaginatorInfo {
    #[serde(rename = "hasMorePages")]
    pub(crate) has_more_pages: bool,
}

/// GraphQL `ID` values arrive as strings but some deployments send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireReach {
    pub(crate) id: WireId,
    pub(crate) river: Option<String>,
    pub(crate) section: Option<String>,
    pub(crate) ploc: Option<String>,
    pub(crate) tloc: Option<String>,
    pub(crate) geom: Option<String>,
    pub(crate) class: Option<String>,
    pub(crate) states: Option<Vec<WireState>>,
    pub(crate) pois: Option<Vec<WirePoi>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireState {
    pub(crate) shortkey: Option<String>,
    pub(crate) name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePoi {
    pub(crate) name: Option<String>,
    pub(crate) difficulty: Option<String>,
    pub(crate) character: Option<Vec<String>>,
    pub(crate) rloc: Option<String>,
}

impl GraphqlResponse {
    /// Convert the envelope into a page, surfacing GraphQL errors.
    pub(crate) fn into_page(self) -> Result<ReachPage, SourceError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SourceError::Service { message });
        }

        let connection = self
            .data
            .and_then(|data| data.reaches)
            .ok_or_else(|| SourceError::Service {
                message: "response missing data.reaches".to_owned(),
            })?;

        Ok(ReachPage {
            reaches: connection
                .data
                .unwrap_or_default()
                .into_iter()
                .map(Reach::from)
                .collect(),
            has_more_pages: connection.paginator_info.has_more_pages,
        })
    }
}

impl From<WireId> for ReachId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => Self::from(text),
            WireId::Number(number) => Self::from(number),
        }
    }
}

impl From<WireReach> for Reach {
    fn from(wire: WireReach) -> Self {
        Self {
            id: wire.id.into(),
            river: wire.river.unwrap_or_default(),
            section: wire.section.unwrap_or_default(),
            class: wire.class,
            put_in: wire.ploc,
            take_out: wire.tloc,
            geometry: wire.geom.unwrap_or_default(),
            states: wire
                .states
                .unwrap_or_default()
                .into_iter()
                .map(|state| State {
                    key: state.shortkey,
                    name: state.name,
                })
                .collect(),
            pois: wire
                .pois
                .unwrap_or_default()
                .into_iter()
                .map(ReachPoi::from)
                .collect(),
        }
    }
}

impl From<WirePoi> for ReachPoi {
    fn from(wire: WirePoi) -> Self {
        Self {
            name: wire.name.unwrap_or_default(),
            difficulty: wire.difficulty,
            characters: wire.character.unwrap_or_default(),
            location: wire.rloc,
        }
    }
}
