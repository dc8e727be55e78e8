//! Document and batch conversion.
//!
//! ```text
//! AnnotatedDocument
//!   -> EntityStore          normalize spans and texts
//!   -> RelationMerger       fuse linked entities
//!   -> SubtermResolver      containment over merged terms
//!   -> LongestSpanFilter    (if longest_only)
//!   -> AnnotationGraphBuilder
//!   -> Conversion { graph, subterms, terms }
//! ```

use termgraph_core::{GraphDocument, Term, TermLookup};

use crate::builder::AnnotationGraphBuilder;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::filter::LongestSpanFilter;
use crate::merge::MergeStats;
use crate::record::AnnotatedDocument;
use crate::store::EntityStore;
use crate::subterm::{SubtermMap, SubtermResolver};

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The document's node graph.
    pub graph: GraphDocument,
    /// Sub-term texts of every merged term, keyed by term identifier.
    pub subterms: SubtermMap,
    /// All merged terms, before longest-span filtering.
    pub terms: Vec<Term>,
    /// Relation merge counts.
    pub merge: MergeStats,
}

/// Converts annotated documents into node graphs.
pub struct Pipeline<'a> {
    lookup: &'a dyn TermLookup,
    config: PipelineConfig,
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("lookup", &self.lookup.source())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline resolving terms through `lookup`.
    ///
    /// # Errors
    ///
    /// `Config` if the configuration does not validate.
    pub fn new(lookup: &'a dyn TermLookup, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { lookup, config })
    }

    /// Create a pipeline with the default configuration.
    #[must_use]
    pub fn with_defaults(lookup: &'a dyn TermLookup) -> Self {
        Self {
            lookup,
            config: PipelineConfig::default(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Convert one document; a record without an id is named `doc1`.
    pub fn convert(&self, doc: &AnnotatedDocument) -> Result<Conversion> {
        self.convert_as(doc, &doc.id_or(|| "doc1".to_string()))
    }

    /// Convert one document under an explicit identifier.
    pub fn convert_as(&self, doc: &AnnotatedDocument, doc_id: &str) -> Result<Conversion> {
        let mut store = EntityStore::from_records(&doc.text, &doc.entities)?;
        let merge = self.config.merger().merge(&mut store, &doc.core_relations());
        let terms = store.into_terms();

        let subterms = SubtermResolver::new().resolve(&terms);
        let retained = if self.config.longest_only {
            LongestSpanFilter::new().filter(terms.clone())
        } else {
            terms.clone()
        };

        let graph = AnnotationGraphBuilder::new(self.lookup)
            .with_tie_break(self.config.tie_break)
            .build(doc_id, &doc.text, &retained)?;

        log::debug!(
            "{}: {} terms ({} merged), {} phrases, {} term nodes",
            doc_id,
            terms.len(),
            merge.merged,
            graph.phrase_count(),
            graph.term_count()
        );

        Ok(Conversion {
            graph,
            subterms,
            terms,
            merge,
        })
    }

    /// Convert many documents independently.
    ///
    /// Results come back in input order. A failing document yields an
    /// `Error::Document` in its slot and does not affect the others. Records
    /// without an id are named by their 1-based position (`doc3`).
    #[must_use]
    pub fn convert_batch(&self, docs: &[AnnotatedDocument]) -> Vec<Result<Conversion>> {
        #[cfg(feature = "parallel")]
        let results: Vec<Result<Conversion>> = {
            use rayon::prelude::*;
            docs.par_iter()
                .enumerate()
                .map(|(idx, doc)| self.convert_numbered(doc, idx + 1))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<Conversion>> = docs
            .iter()
            .enumerate()
            .map(|(idx, doc)| self.convert_numbered(doc, idx + 1))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        log::info!(
            "converted {} of {} documents ({} failed)",
            results.len() - failed,
            results.len(),
            failed
        );
        results
    }

    fn convert_numbered(&self, doc: &AnnotatedDocument, position: usize) -> Result<Conversion> {
        let doc_id = doc.id_or(|| format!("doc{}", position));
        self.convert_as(doc, &doc_id).map_err(|e| {
            log::warn!("document {} failed: {}", doc_id, e);
            Error::in_document(doc_id, e)
        })
    }
}
