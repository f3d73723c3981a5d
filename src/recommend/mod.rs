//! Recommendation engine for resume-to-job matching
//!
//! Implements hybrid ranking: TF-IDF cosine similarity + dense embeddings,
//! fused by score averaging, with a keyword matcher as the last resort.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │              Recommender (corpus, resume text, method)         │
//! └────────────────────────────────────────────────────────────────┘
//!                     │                          │
//!                     ▼                          ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │       LexicalIndex           │  │       SemanticIndex          │
//! │   (TF-IDF, uni+bigrams)      │  │   (f16 flat inner product)   │
//! └──────────────────────────────┘  └──────────────────────────────┘
//!                     │                          │
//!                     └──────────┬───────────────┘
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │   Score averaging (fusion.rs) │
//!                └───────────────────────────────┘
//!                                │
//!               no vector method │ available?
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │  Keyword fallback (skills)    │
//!                └───────────────────────────────┘
//! ```

pub mod embeddings;
pub mod engine;
pub mod fallback;
pub mod fusion;
pub mod lexical;
pub mod normalize;
pub mod semantic;
#[cfg(feature = "fastembed")]
pub mod sentence;
pub mod skills;

// Re-export main types
pub use embeddings::{Embedder, HashEmbedder, ModelHandle, StaticEmbedder, build_embedder};
pub use engine::{
    DEFAULT_TOP_N, FALLBACK_LABEL, HYBRID_LABEL, LEXICAL_LABEL, Method, Recommendation,
    Recommender, SEMANTIC_LABEL,
};
pub use fusion::{HybridResult, fuse_results, fuse_simple};
pub use lexical::LexicalIndex;
pub use normalize::normalize;
pub use semantic::{FlatIpIndex, SemanticIndex};
#[cfg(feature = "fastembed")]
pub use sentence::SentenceEmbedder;
pub use skills::extract_skills;
