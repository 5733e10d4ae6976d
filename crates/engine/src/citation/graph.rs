//! Citation graph representation
//!
//! Immutable in-memory index of articles, authors, and their
//! reference/citation edges. Built once by [`CitationGraphBuilder`] and
//! shared read-only by every allocation and solve.

use super::{ArticleId, Author, AuthorId};
use creditforge_common::errors::{CreditError, Result};
use creditforge_common::metrics;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Edge in the citation graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CitationEdge {
    citing: ArticleId,
    cited: ArticleId,
}

/// Article with its authors and resolved edges
#[derive(Debug, Clone)]
pub struct ArticleNode {
    id: ArticleId,
    authors: Vec<AuthorId>,
    references: BTreeSet<ArticleId>,
    citations: BTreeSet<ArticleId>,
}

impl ArticleNode {
    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// Authors in byline order, without duplicates
    pub fn authors(&self) -> &[AuthorId] {
        &self.authors
    }

    pub fn has_author(&self, author: AuthorId) -> bool {
        self.authors.contains(&author)
    }

    /// Articles this article cites
    pub fn references(&self) -> &BTreeSet<ArticleId> {
        &self.references
    }

    /// Articles citing this article
    pub fn citations(&self) -> &BTreeSet<ArticleId> {
        &self.citations
    }
}

/// In-memory citation graph with dense article and author ids
#[derive(Debug)]
pub struct CitationGraph {
    /// Indexed by article id
    articles: Vec<ArticleNode>,

    /// Indexed by author id
    authors: Vec<Author>,

    /// Edges skipped during construction
    dropped_edges: usize,
}

impl CitationGraph {
    /// Start building a graph
    pub fn builder() -> CitationGraphBuilder {
        CitationGraphBuilder::new()
    }

    /// Get an article by id
    pub fn node(&self, id: ArticleId) -> Result<&ArticleNode> {
        self.articles
            .get(id)
            .ok_or_else(|| CreditError::article_not_found(id))
    }

    /// Get an author by id
    pub fn author(&self, id: AuthorId) -> Result<&Author> {
        self.authors
            .get(id)
            .ok_or_else(|| CreditError::author_not_found(id))
    }

    /// Articles in id order
    pub fn articles(&self) -> impl Iterator<Item = &ArticleNode> {
        self.articles.iter()
    }

    /// Authors in id order
    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Get citation count (incoming edges)
    pub fn citation_count(&self, id: ArticleId) -> Result<usize> {
        Ok(self.node(id)?.citations.len())
    }

    /// Get reference count (outgoing edges)
    pub fn reference_count(&self, id: ArticleId) -> Result<usize> {
        Ok(self.node(id)?.references.len())
    }

    /// Number of edges dropped as unresolved
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }
}

/// Collects ingestion output and validates it into a [`CitationGraph`]
#[derive(Debug, Default)]
pub struct CitationGraphBuilder {
    authors: Vec<Author>,
    articles: Vec<(ArticleId, Vec<AuthorId>)>,
    edges: Vec<CitationEdge>,
}

impl CitationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an author
    pub fn add_author(&mut self, author: Author) -> &mut Self {
        self.authors.push(author);
        self
    }

    /// Add several authors
    pub fn add_authors(&mut self, authors: impl IntoIterator<Item = Author>) -> &mut Self {
        self.authors.extend(authors);
        self
    }

    /// Add an article with its byline
    pub fn add_article(&mut self, id: ArticleId, authors: Vec<AuthorId>) -> &mut Self {
        self.articles.push((id, authors));
        self
    }

    /// Add an edge; unresolved endpoints are dropped at build time
    pub fn add_edge(&mut self, citing: ArticleId, cited: ArticleId) -> &mut Self {
        self.edges.push(CitationEdge { citing, cited });
        self
    }

    /// Add several edges
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (ArticleId, ArticleId)>) -> &mut Self {
        self.edges
            .extend(edges.into_iter().map(|(citing, cited)| CitationEdge { citing, cited }));
        self
    }

    /// Validate ids and resolve edges.
    ///
    /// Article and author ids must be dense (`0..N`). Edges with an
    /// endpoint outside the article set are dropped and counted. A
    /// self-citation is kept, so the article is one of its own citers.
    /// Repeated edges collapse into one.
    pub fn build(&self) -> Result<CitationGraph> {
        let mut authors = self.authors.clone();
        authors.sort_by_key(|a| a.id);
        for (expected, author) in authors.iter().enumerate() {
            if author.id != expected {
                return Err(CreditError::Validation {
                    message: format!(
                        "author ids must be dense 0..{}; found {} at position {}",
                        authors.len(),
                        author.id,
                        expected
                    ),
                });
            }
        }

        let mut records: Vec<&(ArticleId, Vec<AuthorId>)> = self.articles.iter().collect();
        records.sort_by_key(|(id, _)| *id);

        let mut articles = Vec::with_capacity(records.len());
        for (expected, (id, byline)) in records.into_iter().enumerate() {
            if *id != expected {
                return Err(CreditError::Validation {
                    message: format!(
                        "article ids must be dense 0..{}; found {} at position {}",
                        self.articles.len(),
                        id,
                        expected
                    ),
                });
            }

            let mut seen = HashSet::with_capacity(byline.len());
            for &author_id in byline {
                if author_id >= authors.len() {
                    return Err(CreditError::author_not_found(author_id));
                }
                if !seen.insert(author_id) {
                    return Err(CreditError::DuplicateAuthor {
                        article_id: *id,
                        author_id,
                    });
                }
            }

            articles.push(ArticleNode {
                id: *id,
                authors: byline.clone(),
                references: BTreeSet::new(),
                citations: BTreeSet::new(),
            });
        }

        let mut dropped_edges = 0;
        for edge in &self.edges {
            if edge.citing >= articles.len() || edge.cited >= articles.len() {
                debug!(citing = edge.citing, cited = edge.cited, "Dropping unresolved edge");
                dropped_edges += 1;
                continue;
            }
            articles[edge.citing].references.insert(edge.cited);
            articles[edge.cited].citations.insert(edge.citing);
        }

        info!(
            articles = articles.len(),
            authors = authors.len(),
            edges = self.edges.len() - dropped_edges,
            dropped_edges,
            "Citation graph built"
        );
        metrics::record_graph(articles.len(), authors.len(), dropped_edges);

        Ok(CitationGraph {
            articles,
            authors,
            dropped_edges,
        })
    }
}
