//! [`TokenDistribution`]s are representations of how often [`Token`](crate::token::Token)s
//! followed one context in the training text of an [`NGramModel`](crate::NGramModel).

use hashbrown::HashMap;
use itertools::Itertools;
use rand::Rng;

/// The tokens that followed a context, and how many times each one did.
///
/// Choices are kept sorted lexicographically. Sampling walks them in that order, so the same
/// random number always gives the same token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenDistribution<'a> {
    /// Distinct tokens and their counts, sorted by token.
    choices: Vec<(&'a str, u64)>,
    /// Sum of all counts.
    total: u64,
}

impl<'a> TokenDistribution<'a> {
    pub fn builder() -> TokenDistributionBuilder<'a> {
        TokenDistributionBuilder::new()
    }

    /// Number of observations, i.e. the sum of the counts of all choices.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// The distinct tokens and their counts, in sampling order.
    pub fn choices(&self) -> impl Iterator<Item = (&'a str, u64)> + '_ {
        self.choices.iter().copied()
    }

    /// How many times `token` was observed.
    pub fn count(&self, token: &str) -> u64 {
        self.choices
            .binary_search_by(|(t, _)| (*t).cmp(token))
            .map_or(0, |i| self.choices[i].1)
    }

    /// Relative frequency of `token`. An empty distribution gives `0.0` for every token.
    pub fn probability(&self, token: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(token) as f64 / self.total as f64
    }

    /// Picks the token at `r` in the cumulative distribution, where `r` is in `[0, 1)`.
    ///
    /// The relative frequencies of the choices are added up in lexicographic order, and the
    /// first choice where the sum reaches `r` is returned. If the distribution is empty, or the
    /// sum never reaches `r` due to rounding, `None` is returned.
    pub fn sample(&self, r: f64) -> Option<&'a str> {
        let total = self.total as f64;
        let mut cumulative = 0.0;
        for &(token, n) in &self.choices {
            cumulative += n as f64 / total;
            if cumulative >= r {
                return Some(token);
            }
        }
        None
    }

    /// Draws a uniform number from `rng` and [samples](TokenDistribution::sample) with it.
    pub fn get_random_token(&self, rng: &mut impl Rng) -> Option<&'a str> {
        if self.is_empty() {
            return None;
        }
        self.sample(rng.gen::<f64>())
    }
}

/// Builder for [`TokenDistribution`]. Used when scanning the n-grams of a model to count every
/// token that follows a context, and then to build a sorted distribution from those counts.
#[derive(Clone, Debug, Default)]
pub struct TokenDistributionBuilder<'a> {
    /// Counts how many times a token has appeared.
    map: HashMap<&'a str, u64>,
}

impl<'a> TokenDistributionBuilder<'a> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Add an occurence of this token.
    pub fn add_token(&mut self, token: &'a str) {
        *self.map.entry(token).or_insert(0) += 1;
    }

    /// Creates the distribution, with its choices sorted by token.
    pub fn build(self) -> TokenDistribution<'a> {
        let total = self.map.values().sum();
        let choices = self
            .map
            .into_iter()
            .sorted_unstable_by(|a, b| a.0.cmp(b.0))
            .collect();

        TokenDistribution { choices, total }
    }
}
