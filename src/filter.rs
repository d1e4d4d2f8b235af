//! Dashboard query: one page of a user's ideas, narrowed by tag and stage.

use sqlx::SqlitePool;

use crate::models::{Idea, IdeaSummary, Stage};

pub const PAGE_SIZE: i64 = 50;

/// Sentinel the dashboard links use for "no filter".
const NONE_SENTINEL: &str = "none";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub tag: Option<String>,
    pub stage: Option<Stage>,
}

/// Raw query string of `/board` and `/api/ideas`.
#[derive(Debug, Default)]
pub struct FilterParams {
    pub tag: Option<String>,
    pub stage: Option<String>,
    pub page: Option<String>,
}

/// Built from raw query pairs. The first occurrence of a key wins; unknown
/// keys are ignored.
impl FromIterator<(String, String)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = FilterParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tag" => &mut params.tag,
                "stage" => &mut params.stage,
                "page" => &mut params.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

impl FilterParams {
    pub fn filter(&self) -> IdeaFilter {
        let tag = self
            .tag
            .as_deref()
            .filter(|t| !t.is_empty() && *t != NONE_SENTINEL)
            .map(str::to_string);

        let stage = match self.stage.as_deref() {
            None | Some("") | Some(NONE_SENTINEL) => None,
            Some(raw) => match raw.parse::<Stage>() {
                Ok(stage) => Some(stage),
                Err(()) => {
                    tracing::debug!(stage = raw, "unrecognized stage filter, listing all stages");
                    None
                }
            },
        };

        IdeaFilter { tag, stage }
    }

    /// 1-based page; anything unparseable or below 1 is page 1.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }
}

#[derive(Debug)]
pub struct IdeaPage {
    pub ideas: Vec<IdeaSummary>,
    pub page: u32,
    pub has_next: bool,
}

/// One page of `owner_id`'s ideas, newest number first.
///
/// A tag name that none of the owner's tags carries yields an empty page.
pub async fn list_ideas(
    db: &SqlitePool,
    owner_id: &str,
    filter: &IdeaFilter,
    page: u32,
) -> Result<IdeaPage, sqlx::Error> {
    let page = page.max(1);
    let offset = i64::from(page - 1) * PAGE_SIZE;

    let tag_clause = match filter.tag {
        Some(_) => {
            r#"AND EXISTS (
                SELECT 1 FROM idea_tags it JOIN tags t ON t.id = it.tag_id
                WHERE it.idea_id = i.id AND t.user_id = i.user_id AND t.name = ?
            )"#
        }
        None => "",
    };

    let stage_clause = match filter.stage {
        Some(Stage::NotStarted) => {
            "AND i.complete = 0 AND NOT EXISTS (SELECT 1 FROM posts p WHERE p.idea_id = i.id)"
        }
        Some(Stage::InProgress) => {
            "AND i.complete = 0 AND EXISTS (SELECT 1 FROM posts p WHERE p.idea_id = i.id)"
        }
        Some(Stage::Done) => "AND i.complete = 1",
        None => "",
    };

    let sql = format!(
        r#"
        SELECT i.* FROM ideas i
        WHERE i.user_id = ? {tag_clause} {stage_clause}
        ORDER BY i.number DESC, i.id ASC
        LIMIT ? OFFSET ?
        "#
    );

    let mut query = sqlx::query_as::<_, Idea>(&sql).bind(owner_id);
    if let Some(tag) = &filter.tag {
        query = query.bind(tag);
    }

    // One extra row tells whether a next page exists.
    let mut rows = query.bind(PAGE_SIZE + 1).bind(offset).fetch_all(db).await?;

    let has_next = rows.len() as i64 > PAGE_SIZE;
    rows.truncate(PAGE_SIZE as usize);

    Ok(IdeaPage {
        ideas: rows.into_iter().map(IdeaSummary::from).collect(),
        page,
        has_next,
    })
}
