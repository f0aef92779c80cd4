//! Rule registry
//!
//!     The [Grammar] owns every rule. A rule keeps the expression it was defined with and
//!     an override slot; mocking fills the slot, unmocking empties it. Matching always
//!     goes through [Grammar::effective], so an override is visible to every reference to
//!     the rule without touching the referencing rules.
//!
//!     Every mock/unmock bumps a generation counter. Memoized match results are keyed by
//!     it, so nothing cached under one set of overrides can be served under another.

use super::analysis;
use super::expr::Expression;
use super::GrammarError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub name: String,
    pub expression: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    overridden: Option<Expression>,
}

impl Rule {
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            name: name.into(),
            expression,
            overridden: None,
        }
    }

    /// The expression matching uses: the override when present, the definition otherwise.
    pub fn effective(&self) -> &Expression {
        self.overridden.as_ref().unwrap_or(&self.expression)
    }

    pub fn is_mocked(&self) -> bool {
        self.overridden.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: BTreeMap<String, Rule>,
    generation: u64,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Redefining a name replaces the old rule, override included.
    pub fn define(&mut self, name: &str, expression: Expression) -> &mut Self {
        if self
            .rules
            .insert(name.to_string(), Rule::new(name, expression))
            .is_some()
        {
            tracing::debug!(rule = name, "rule redefined");
            self.generation += 1;
        }
        self
    }

    pub fn get(&self, name: &str) -> Result<&Rule, GrammarError> {
        self.rules
            .get(name)
            .ok_or_else(|| GrammarError::undefined(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn effective(&self, name: &str) -> Result<&Expression, GrammarError> {
        self.get(name).map(Rule::effective)
    }

    /// Replace a rule with a placeholder that matches one token spelling its name.
    pub fn mock(&mut self, name: &str) -> Result<(), GrammarError> {
        let rule = self
            .rules
            .get_mut(name)
            .ok_or_else(|| GrammarError::undefined(name))?;
        rule.overridden = Some(Expression::Mock);
        self.generation += 1;
        tracing::debug!(rule = name, generation = self.generation, "rule mocked");
        Ok(())
    }

    /// Restore a rule's original definition. Unmocking a rule that isn't mocked is a no-op.
    pub fn unmock(&mut self, name: &str) -> Result<(), GrammarError> {
        let rule = self
            .rules
            .get_mut(name)
            .ok_or_else(|| GrammarError::undefined(name))?;
        if rule.overridden.take().is_some() {
            self.generation += 1;
            tracing::debug!(rule = name, generation = self.generation, "rule unmocked");
        }
        Ok(())
    }

    pub fn unmock_all(&mut self) {
        let mut cleared = 0;
        for rule in self.rules.values_mut() {
            if rule.overridden.take().is_some() {
                cleared += 1;
            }
        }
        if cleared > 0 {
            self.generation += 1;
            tracing::debug!(cleared, generation = self.generation, "all mocks cleared");
        }
    }

    pub fn is_mocked(&self, name: &str) -> bool {
        self.rules.get(name).is_some_and(Rule::is_mocked)
    }

    pub fn mocked_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .values()
            .filter(|rule| rule.is_mocked())
            .map(|rule| rule.name.as_str())
    }

    /// Changes every time the set of effective expressions changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolve every rule reachable from `root` under the current overrides. Reports the
    /// first undefined reference in breadth-first order, with the rule that makes it.
    pub fn validate(&self, root: &str) -> Result<(), GrammarError> {
        let mut seen = BTreeSet::from([root]);
        let mut queue = VecDeque::from([(root, None::<&str>)]);

        while let Some((name, referenced_by)) = queue.pop_front() {
            let rule = self
                .rules
                .get(name)
                .ok_or_else(|| GrammarError::UndefinedRule {
                    name: name.to_string(),
                    referenced_by: referenced_by.map(str::to_string),
                })?;

            for reference in rule.effective().referenced_rules() {
                if seen.insert(reference) {
                    queue.push_back((reference, Some(rule.name.as_str())));
                }
            }
        }

        tracing::trace!(root, rules = seen.len(), "grammar validated");
        Ok(())
    }

    /// Fails with the first left-recursive cycle found, if any.
    pub fn check_left_recursion(&self) -> Result<(), GrammarError> {
        match analysis::find_left_recursion(self) {
            Some(cycle) => Err(GrammarError::LeftRecursion(cycle)),
            None => Ok(()),
        }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
