//! Nearest-neighbor category voting.
//!
//! Converts the vector index's `(category, distance)` neighbor list into a
//! single [`Verdict`] by majority vote weighted by inverse distance.
//! Confidence is the normalized vote margin: 1.0 means unanimous close
//! neighbors, and it falls toward 0 as the neighborhood gets mixed, far, or
//! thin. Zero neighbors is an [`Unavailable::EmptyIndex`], never a panic.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use quadra_core::{Category, Neighbor, Unavailable, VectorSearch, Verdict};

/// Wraps the external vector search collaborator as a classifier adapter.
pub struct SemanticSuggester {
    index: Arc<dyn VectorSearch>,
    neighbor_count: usize,
}

impl SemanticSuggester {
    pub fn new(index: Arc<dyn VectorSearch>) -> Self {
        Self {
            index,
            neighbor_count: quadra_core::defaults::NEIGHBOR_COUNT,
        }
    }

    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = k.max(1);
        self
    }

    /// Produce a verdict for the given note text.
    ///
    /// Index failures and empty results both surface as [`Unavailable`];
    /// the decision maker's fallback chain handles them.
    pub async fn suggest(&self, text: &str) -> Result<Verdict, Unavailable> {
        let neighbors = match self.index.search_neighbors(text, self.neighbor_count).await {
            Ok(neighbors) => neighbors,
            Err(e) => {
                warn!(error = %e, "vector index failed, semantic side unavailable");
                return Err(Unavailable::Backend(e.to_string()));
            }
        };
        suggest(&neighbors)
    }

    /// Total indexed notes, for the corpus-size weight factor. A failing
    /// index reports an empty corpus.
    pub async fn corpus_size(&self) -> usize {
        self.index.corpus_size().await.unwrap_or(0)
    }
}

/// Pure voting step over an already-fetched neighbor list.
pub fn suggest(neighbors: &[Neighbor]) -> Result<Verdict, Unavailable> {
    if neighbors.is_empty() {
        return Err(Unavailable::EmptyIndex);
    }

    // Inverse-distance vote per canonical category.
    let mut votes: BTreeMap<Category, f32> = BTreeMap::new();
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    let mut total_weight = 0.0f32;
    for neighbor in neighbors {
        let category = Category::normalize(&neighbor.category);
        let weight = 1.0 / (1.0 + neighbor.distance);
        *votes.entry(category).or_default() += weight;
        *counts.entry(category).or_default() += 1;
        total_weight += weight;
    }

    let (winner, winner_weight) = votes
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, w)| (*c, *w))
        .unwrap_or((Category::Resources, 0.0));

    let runner_up_weight = votes
        .iter()
        .filter(|(c, _)| **c != winner)
        .map(|(_, w)| *w)
        .fold(0.0f32, f32::max);

    let winner_share = if total_weight > 0.0 {
        winner_weight / total_weight
    } else {
        0.0
    };
    let margin = (winner_weight - runner_up_weight) / total_weight.max(f32::EPSILON);

    let confidence = (winner_share * 0.6
        + (margin * 2.0).min(0.3)
        + (neighbors.len() as f32 / 20.0).min(0.1))
    .clamp(0.0, 1.0);

    let winner_count = counts.get(&winner).copied().unwrap_or(0);
    debug!(
        category = %winner,
        confidence,
        neighbor_count = neighbors.len(),
        "semantic vote"
    );

    Ok(Verdict::new(
        winner,
        confidence,
        format!(
            "{} of {} neighbors vote {} (inverse-distance share {:.2})",
            winner_count,
            neighbors.len(),
            winner,
            winner_share
        ),
    ))
}
