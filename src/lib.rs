//! Dead simple text generation using n-gram language models.
//!
//! An [`NGramModel`] of order `n` is trained on sentences by splitting them into [`Token`]s and
//! remembering every run of `n` tokens it sees. The first `n - 1` tokens of such a run are its
//! context. The model can then tell how likely a token is to follow a context, and generate new
//! text by repeatedly drawing the next token from what has followed the previous `n - 1` tokens.
//!
//! Sentences are padded with [`START`](token::START) and [`END`](token::END) markers, so that
//! generated text begins and ends sentences the way the training text did.
//!
//! ```
//! use ngramish::NGramModel;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let model = NGramModel::from_text(2, "a b c d. a b a b").unwrap();
//! assert!((model.probability(&["b"], "c") - 1.0 / 3.0).abs() < 1e-12);
//! assert_eq!(model.probability(&["y"], "c"), 0.0);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let text = model.generate_text(&mut rng, 10);
//! assert_eq!(text.split(' ').count(), 10);
//! ```
//!
//! Randomness always comes from an [`rand::Rng`] you pass in, so seeding it gives the same text
//! every time.
//!
//! # Features
//!
//! `ngramish` comes with some features that you can disable (or enable) at will. They are:
//!
//! - `inline-more` - Enables the `inline-more` feature of
//! [`hashbrown`](https://crates.io/crates/hashbrown), used when counting tokens. Enabled by
//! default.
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://crates.io/crates/log) facade, and does not install
//! a logger of its own.

pub mod config;
pub mod distribution;
pub mod error;
pub mod model;
pub mod token;

pub use config::{ModelConfig, ModelConfigBuilder, ReadErrorPolicy};
pub use distribution::{TokenDistribution, TokenDistributionBuilder};
pub use error::{NGramError, Result};
pub use model::NGramModel;
pub use token::{tokenize, Token};
