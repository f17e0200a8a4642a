//! See the top level crate documentation for information about the [`NGramModel`] type.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use log::{debug, info, trace, warn};
use rand::Rng;

use crate::config::{ModelConfig, ReadErrorPolicy};
use crate::distribution::{TokenDistribution, TokenDistributionBuilder};
use crate::error::{NGramError, Result};
use crate::token::{tokenize, Token, END, NO_TOKEN, START};

/// An n-gram language model, trained on sentences and used to generate similar text.
///
/// Every n-gram seen during training is kept, in training order, duplicates included. Queries
/// scan all of them, so the cost of a query grows with the size of the training text.
///
/// ```
/// # use ngramish::NGramModel;
/// # use rand::{rngs::StdRng, SeedableRng};
/// let model = NGramModel::from_text(2, "I am here. I am there").unwrap();
/// assert_eq!(model.probability(&["am"], "here"), 0.5);
///
/// // Every sentence starts with "I am"
/// let text = model.generate_text(&mut StdRng::seed_from_u64(42), 2);
/// assert_eq!(text, "I am");
/// ```
#[derive(Clone, Debug)]
pub struct NGramModel {
    cfg: ModelConfig,
    /// Each n-gram is exactly `order` tokens long; its context is all but the last token.
    grams: Vec<Box<[Token]>>,
}

/// Returns `true` if the context of `gram` is exactly `context`.
fn has_context(gram: &[Token], context: &[&str]) -> bool {
    let ctx = &gram[..gram.len() - 1];
    ctx.len() == context.len() && ctx.iter().zip(context).all(|(a, b)| a == b)
}

impl NGramModel {
    /// Creates an empty model.
    pub fn new(cfg: ModelConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            grams: Vec::new(),
        })
    }

    /// Creates an empty model of the given order, using defaults for everything else.
    pub fn with_order(order: usize) -> Result<Self> {
        Self::new(ModelConfig {
            order,
            ..ModelConfig::default()
        })
    }

    /// Creates a model of the given order trained on `text`. See [`NGramModel::feed_text()`].
    pub fn from_text(order: usize, text: &str) -> Result<Self> {
        let mut model = Self::with_order(order)?;
        model.feed_text(text);
        Ok(model)
    }

    /// Reads the file at `path` and trains a model of the given order on it.
    ///
    /// If the file cannot be read, a warning is logged and an empty model is returned. Use
    /// [`NGramModel::from_config()`] with [`ReadErrorPolicy::Strict`] to get an error instead.
    pub fn from_path(order: usize, path: impl AsRef<Path>) -> Result<Self> {
        let cfg = ModelConfig {
            order,
            ..ModelConfig::default()
        };
        Self::from_config(cfg, path)
    }

    /// Reads the file at `path` and trains a model on it, as configured by `cfg`.
    ///
    /// The file is read whole, and invalid UTF-8 is replaced with `U+FFFD`.
    pub fn from_config(cfg: ModelConfig, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut model = Self::new(cfg)?;

        match fs::read(path) {
            Ok(bytes) => model.feed_text(&String::from_utf8_lossy(&bytes)),
            Err(err) => match model.cfg.on_read_error {
                ReadErrorPolicy::Strict => return Err(NGramError::io(err, path)),
                ReadErrorPolicy::Lenient => {
                    warn!("could not read {path:?}, continuing with an empty model: {err}");
                }
            },
        }

        info!(
            "built order {} model with {} n-grams from {path:?}",
            model.order(),
            model.len()
        );
        Ok(model)
    }

    pub fn order(&self) -> usize {
        self.cfg.order
    }

    pub fn config(&self) -> &ModelConfig {
        &self.cfg
    }

    /// Number of n-grams seen during training, duplicates included.
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// All n-grams in the order they were trained on.
    pub fn ngrams(&self) -> impl Iterator<Item = &[Token]> + '_ {
        self.grams.iter().map(|g| &g[..])
    }

    /// The context of every n-gram, aligned with [`NGramModel::ngrams()`].
    pub fn contexts(&self) -> impl Iterator<Item = &[Token]> + '_ {
        let n = self.order() - 1;
        self.grams.iter().map(move |g| &g[..n])
    }

    /// Splits `text` into sentences on the configured delimiter, and trains on each of them.
    pub fn feed_text(&mut self, text: &str) {
        let before = self.len();
        let mut sentences = 0_usize;
        for sentence in text.split(self.cfg.sentence_delimiter) {
            self.feed_str(sentence);
            sentences += 1;
        }
        debug!(
            "fed {sentences} sentences, adding {} n-grams",
            self.len() - before
        );
    }

    /// Tokenizes a single sentence with [`tokenize()`] and trains on its tokens.
    pub fn feed_str(&mut self, sentence: &str) {
        let tokens = tokenize(self.order(), sentence);
        self.feed_tokens(&tokens);
    }

    /// Trains on an already tokenized sentence. No padding is added, so the tokens should
    /// include any sentence markers you want the model to know about.
    ///
    /// A sequence shorter than the order of the model contains no n-grams and adds nothing.
    pub fn feed_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let order = self.order();
        self.grams.extend(
            tokens
                .windows(order)
                .map(|w| w.iter().map(|t| t.as_ref().to_string()).collect()),
        );
    }

    /// The probability that `token` follows `context`, that is, how often it did in the training
    /// text.
    ///
    /// If `context` has never been seen, `0.0` is returned. A context that is not `order - 1`
    /// tokens long can never have been seen.
    pub fn probability(&self, context: &[&str], token: &str) -> f64 {
        let (total, matches) = self
            .grams
            .iter()
            .filter(|g| has_context(g, context))
            .fold((0_u64, 0_u64), |(total, matches), g| {
                let hit = g.last().is_some_and(|t| t == token);
                (total + 1, matches + u64::from(hit))
            });

        if total == 0 {
            return 0.0;
        }
        matches as f64 / total as f64
    }

    /// All tokens that have followed `context`, and how many times.
    pub fn distribution(&self, context: &[&str]) -> TokenDistribution<'_> {
        let mut builder = TokenDistributionBuilder::new();
        for g in self.grams.iter().filter(|g| has_context(g, context)) {
            if let Some(t) = g.last() {
                builder.add_token(t);
            }
        }
        builder.build()
    }

    /// Generates a random new token using the previous tokens.
    ///
    /// The token is drawn from the [distribution](NGramModel::distribution()) of `context`. If the
    /// model has never seen `context`, `None` is returned.
    pub fn generate_next_token(&self, rng: &mut impl Rng, context: &[&str]) -> Option<&str> {
        let next = self.distribution(context).get_random_token(rng);
        if next.is_none() {
            trace!("no token has followed {context:?}");
        }
        next
    }

    /// Generates exactly `n` tokens, starting from the beginning of a sentence.
    ///
    /// Each token is generated from the `order - 1` tokens before it. When [`END`] is generated,
    /// the next token starts a new sentence. If nothing can be generated, [`NO_TOKEN`] is used in
    /// its place.
    pub fn generate_n_tokens(&self, rng: &mut impl Rng, n: usize) -> Vec<&str> {
        let sentence_start = || vec![START; self.order() - 1];

        let mut context: Vec<&str> = sentence_start();
        let mut res = Vec::with_capacity(n);

        for _ in 0..n {
            let next = self.generate_next_token(rng, &context).unwrap_or(NO_TOKEN);
            res.push(next);

            if next == END {
                context = sentence_start();
            } else if !context.is_empty() {
                context.remove(0);
                context.push(next);
            }
        }

        res
    }

    /// Like [`NGramModel::generate_n_tokens()`], but joins the tokens with spaces.
    pub fn generate_text(&self, rng: &mut impl Rng, n: usize) -> String {
        self.generate_n_tokens(rng, n).into_iter().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn trained(order: usize, sentences: &[&str]) -> NGramModel {
        let mut model = NGramModel::with_order(order).unwrap();
        for s in sentences {
            model.feed_str(s);
        }
        model
    }

    #[test]
    fn order_zero_is_rejected() {
        assert!(matches!(
            NGramModel::with_order(0),
            Err(NGramError::InvalidOrder(0))
        ));
        assert!(NGramModel::from_text(0, "a b c").is_err());
    }

    #[test]
    fn unigram_probabilities() {
        let model = trained(1, &["a b c d", "a b a b"]);
        assert_eq!(model.len(), 10);
        assert!((model.probability(&[], "a") - 0.3).abs() < 1e-12);
        assert!((model.probability(&[], "c") - 0.1).abs() < 1e-12);
        assert!((model.probability(&[], END) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn bigram_probabilities() {
        let model = trained(2, &["a b c d", "a b a b"]);
        assert!((model.probability(&["b"], "c") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(model.probability(&[START], "a"), 1.0);
        assert_eq!(model.probability(&["y"], "c"), 0.0);
    }

    #[test]
    fn wrong_context_length_never_matches() {
        let model = trained(2, &["a b c d"]);
        assert_eq!(model.probability(&[], "a"), 0.0);
        assert_eq!(model.probability(&["a", "b"], "c"), 0.0);
        assert!(model.distribution(&["a", "b"]).is_empty());
    }

    #[test]
    fn ngrams_are_appended_in_training_order() {
        let model = trained(2, &["a b", "c"]);
        let grams: Vec<Vec<&str>> = model
            .ngrams()
            .map(|g| g.iter().map(String::as_str).collect())
            .collect();
        assert_eq!(
            grams,
            vec![
                vec![START, "a"],
                vec!["a", "b"],
                vec!["b", END],
                vec![START, "c"],
                vec!["c", END],
            ]
        );
    }

    #[test]
    fn contexts_align_with_ngrams() {
        let model = trained(3, &["the cat sat.", "the dog sat on the cat"]);
        assert_eq!(model.contexts().count(), model.len());
        for (ctx, gram) in model.contexts().zip(model.ngrams()) {
            assert_eq!(ctx.len(), 2);
            assert_eq!(ctx, &gram[..2]);
        }
    }

    #[test]
    fn short_token_sequences_add_nothing() {
        let mut model = NGramModel::with_order(3).unwrap();
        model.feed_tokens(&["a", "b"]);
        assert!(model.is_empty());
        model.feed_tokens(&["a", "b", "c"]);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn feed_text_splits_on_delimiter() {
        let model = NGramModel::from_text(1, "a b c d. a b a b").unwrap();
        assert_eq!(model.len(), 10);
        assert!((model.probability(&[], "a") - 0.3).abs() < 1e-12);

        let cfg = ModelConfig::builder()
            .order(1)
            .sentence_delimiter('\n')
            .build()
            .unwrap();
        let mut model = NGramModel::new(cfg).unwrap();
        model.feed_text("a b.\nc");
        // "a", "b", ".", END, "c", END
        assert_eq!(model.len(), 6);
    }

    #[test]
    fn training_order_does_not_change_probabilities() {
        let ab = trained(2, &["a b c d", "a b a b"]);
        let ba = trained(2, &["a b a b", "a b c d"]);

        let sorted = |m: &NGramModel| m.ngrams().map(<[Token]>::to_vec).sorted().collect_vec();
        assert_eq!(sorted(&ab), sorted(&ba));
        assert_eq!(ab.probability(&["b"], "a"), ba.probability(&["b"], "a"));
    }

    #[test]
    fn distribution_counts_successors() {
        let model = trained(2, &["a b c d", "a b a b"]);
        let d = model.distribution(&["b"]);
        assert_eq!(
            d.choices().collect::<Vec<_>>(),
            vec![(END, 1), ("a", 1), ("c", 1)]
        );
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn next_token_follows_sorted_order() {
        let model = trained(2, &["a b c d", "a b a b"]);
        assert_eq!(
            model.generate_next_token(&mut StepRng::new(0, 0), &["b"]),
            Some(END)
        );
        assert_eq!(
            model.generate_next_token(&mut StepRng::new(u64::MAX, 0), &["b"]),
            Some("c")
        );
        assert_eq!(
            model.generate_next_token(&mut StepRng::new(0, 0), &["y"]),
            None
        );
    }

    #[test]
    fn single_path_generation_restarts_sentences() {
        let model = trained(2, &["I am here"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.generate_text(&mut rng, 5), "I am here <end> I");
    }

    #[test]
    fn trigram_generation_restarts_sentences() {
        let model = trained(3, &["a b c"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            model.generate_n_tokens(&mut rng, 6),
            vec!["a", "b", "c", END, "a", "b"]
        );
    }

    #[test]
    fn unigram_generation_uses_global_context() {
        let model = trained(1, &["a b c d", "a b a b"]);
        let mut rng = StdRng::seed_from_u64(3);
        let tokens = model.generate_n_tokens(&mut rng, 50);
        assert_eq!(tokens.len(), 50);
        assert!(tokens.iter().all(|t| ["a", "b", "c", "d", END].contains(t)));
    }

    #[test]
    fn empty_model_generates_placeholders() {
        let model = NGramModel::with_order(2).unwrap();
        assert_eq!(
            model.generate_text(&mut StdRng::seed_from_u64(0), 3),
            "<> <> <>"
        );
    }

    #[test]
    fn zero_tokens_is_empty_text() {
        let model = trained(2, &["a b c"]);
        assert_eq!(model.generate_text(&mut StdRng::seed_from_u64(0), 0), "");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let model = trained(
            2,
            &[
                "the cat sat on the mat",
                "the dog sat on the log",
                "a cat and a dog met on the mat",
            ],
        );
        let first = model.generate_text(&mut StdRng::seed_from_u64(1234), 40);
        let second = model.generate_text(&mut StdRng::seed_from_u64(1234), 40);
        assert_eq!(first, second);
        assert_eq!(first.split(' ').count(), 40);
    }

    proptest! {
        #[test]
        fn probabilities_of_a_seen_context_sum_to_one(
            order in 1_usize..4,
            sentences in prop::collection::vec("[a-c ]{0,12}", 1..5),
        ) {
            let mut model = NGramModel::with_order(order).unwrap();
            for s in &sentences {
                model.feed_str(s);
            }

            let first = model.contexts().next().unwrap();
            let context: Vec<&str> = first.iter().map(String::as_str).collect();
            let sum: f64 = model
                .distribution(&context)
                .choices()
                .map(|(t, _)| model.probability(&context, t))
                .sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        #[test]
        fn unseen_context_has_zero_probability(token in "[a-z]{1,5}") {
            let model = trained(2, &["a b c d", "a b a b"]);
            prop_assert_eq!(model.probability(&["zzzzzz"], &token), 0.0);
        }
    }
}
