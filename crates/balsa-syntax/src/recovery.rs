//! Error recovery by bounded lookahead.
//!
//! When the parser hits a token that does not fit, it asks the engine for a
//! fix: insert a missing token (or a whole missing expression or type), or
//! remove the offending token. Each candidate is scored by simulating the
//! parse of the next few tokens against the grammar table, and the candidate
//! that matches the most tokens wins. The parser applies only the first fix
//! of the winning path and asks again when it fails the next time.
//!
//! The simulation never touches the parser's real context stack. Remaining
//! contexts are kept in a persistent linked list, so that branching is just
//! sharing a tail.

use std::cell::Cell;
use std::rc::Rc;

use crate::SyntaxKind;
use crate::grammar::{Ctx, Rule};

/// How many simulation steps a single query may take at most.
const STEP_BUDGET: usize = 20_000;

/// A persistent list of contexts still to be matched.
pub type Continuation = Option<Rc<Link>>;

/// One entry of a [`Continuation`].
#[derive(Debug)]
pub struct Link {
    ctx: Ctx,
    next: Continuation,
}

/// Put a context in front of a continuation.
pub fn cons(ctx: Ctx, next: &Continuation) -> Continuation {
    Some(Rc::new(Link { ctx, next: next.clone() }))
}

/// Put a run of contexts in front of a continuation, keeping their order.
pub fn prepend(items: &[Ctx], next: &Continuation) -> Continuation {
    items.iter().rev().fold(next.clone(), |acc, &ctx| cons(ctx, &acc))
}

/// The fix to apply at the point of failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Fix {
    /// Synthesize the context `ctx` as a missing token of kind `kind`.
    ///
    /// When the failing context was a choice, `alt` names the alternative
    /// the insertion happened in.
    Insert { ctx: Ctx, kind: SyntaxKind, alt: Option<Ctx> },
    /// Skip the current token.
    Remove,
}

/// The outcome of a recovery query.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Solution {
    /// What to do.
    pub fix: Fix,
    /// How many lookahead tokens matched after the fix.
    pub matches: usize,
    /// How far into the lookahead the winning path looked.
    pub lookahead: usize,
}

/// The score of a simulated path.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
struct Score {
    matches: usize,
    reach: usize,
}

impl Score {
    fn matched(self, reach: usize) -> Self {
        Self { matches: self.matches + 1, reach: self.reach.max(reach) }
    }

    fn reached(self, reach: usize) -> Self {
        Self { reach: self.reach.max(reach), ..self }
    }
}

/// Keeps the better of two scores. Ties go to the one seen first.
fn better(best: Option<Score>, score: Score) -> Option<Score> {
    match best {
        Some(best) if best.matches >= score.matches => Some(best),
        _ => Some(score),
    }
}

/// The recovery engine.
pub struct Recovery<'a> {
    /// The upcoming token kinds, starting with the offending one.
    tokens: &'a [SyntaxKind],
    /// How many fixes and matches deep a path may go.
    limit: usize,
    /// Simulation steps left for the current query.
    budget: Cell<usize>,
}

impl<'a> Recovery<'a> {
    /// Create an engine looking at most `limit` steps ahead into `tokens`.
    pub fn new(tokens: &'a [SyntaxKind], limit: usize) -> Self {
        Self { tokens, limit: limit.max(1), budget: Cell::new(STEP_BUDGET) }
    }

    /// Find the best fix for a failure to match `ctx` at the first token,
    /// with `continuation` describing everything that comes after `ctx`.
    ///
    /// Insertions are tried before removal and win ties against it.
    #[tracing::instrument(level = "debug", skip(self, continuation))]
    pub fn solve(&self, ctx: Ctx, continuation: &Continuation) -> Solution {
        self.budget.set(STEP_BUDGET);
        let mut best: Option<(Fix, Score)> = None;

        for (inserted, alt, rest) in insertions(ctx, continuation) {
            let Some(kind) = inserted.insert_kind() else { continue };
            let score = self.seek(&rest, 0, 1, Score::default());
            if best.is_none_or(|(_, best)| score.matches > best.matches) {
                best = Some((Fix::Insert { ctx: inserted, kind, alt }, score));
            }
        }

        if self.token(0) != SyntaxKind::Eof {
            let score = self.seek(&cons(ctx, continuation), 1, 1, Score::default().reached(1));
            if best.is_none_or(|(_, best)| score.matches > best.matches) {
                best = Some((Fix::Remove, score));
            }
        }

        let (fix, score) = best.unwrap_or((
            Fix::Insert { ctx, kind: SyntaxKind::Ident, alt: None },
            Score::default(),
        ));
        tracing::debug!(?fix, matches = score.matches, "recovered");
        Solution { fix, matches: score.matches, lookahead: score.reach }
    }

    /// Pick the alternative of `ctx` under which the upcoming tokens parse
    /// best. Earlier alternatives win ties.
    pub fn predict(&self, ctx: Ctx, continuation: &Continuation) -> Ctx {
        self.budget.set(STEP_BUDGET);
        let Rule::Alt(alts) = ctx.rule() else { return ctx };
        let mut best: Option<(Ctx, usize)> = None;
        for &alt in alts {
            let score = self.head(alt, continuation, 0, 0, Score::default());
            if best.is_none_or(|(_, matches)| score.matches > matches) {
                best = Some((alt, score.matches));
            }
        }
        best.map_or(ctx, |(alt, _)| alt)
    }

    /// The token kind at the given lookahead position.
    fn token(&self, la: usize) -> SyntaxKind {
        self.tokens.get(la).copied().unwrap_or(SyntaxKind::Eof)
    }

    /// Use up one simulation step. Returns `false` when none are left.
    fn tick(&self) -> bool {
        let left = self.budget.get();
        self.budget.set(left.saturating_sub(1));
        left > 0
    }

    /// Match the continuation against the tokens from `la` on.
    fn seek(&self, cont: &Continuation, la: usize, depth: usize, score: Score) -> Score {
        if depth >= self.limit || !self.tick() {
            return score;
        }
        match cont {
            Some(link) => self.head(link.ctx, &link.next, la, depth, score),
            None => score,
        }
    }

    /// Match a single context, followed by the rest of the continuation.
    fn head(
        &self,
        ctx: Ctx,
        rest: &Continuation,
        la: usize,
        depth: usize,
        score: Score,
    ) -> Score {
        let t = self.token(la);
        if ctx.is_whole() && !ctx.first().contains(t) {
            return self.mismatch(ctx, rest, la, depth, score);
        }

        match ctx.rule() {
            Rule::Token(set, _) if set.contains(t) => {
                self.seek(rest, la + 1, depth + 1, score.matched(la + 1))
            }
            Rule::Token(..) => self.mismatch(ctx, rest, la, depth, score),
            Rule::Empty => self.seek(rest, la, depth, score),
            Rule::Seq(items) => self.seek(&prepend(items, rest), la, depth, score),
            Rule::Alt(alts) => {
                let mut best = None;
                for &alt in alts {
                    if alt.first().contains(t) || alt.nullable() {
                        best = better(best, self.head(alt, rest, la, depth, score));
                    }
                }
                best.unwrap_or_else(|| self.mismatch(ctx, rest, la, depth, score))
            }
            Rule::Many(item) => {
                let again = cons(ctx, rest);
                let mut best = None;
                if item.first().contains(t) {
                    best = better(best, self.head(item, &again, la, depth, score));
                }
                best = better(best, self.seek(rest, la, depth, score));
                if !item.first().contains(t) && t != SyntaxKind::Eof {
                    let skipped = self.seek(&again, la + 1, depth + 1, score.reached(la + 1));
                    if best.is_none_or(|best| skipped.matches > best.matches) {
                        best = Some(skipped);
                    }
                }
                best.unwrap_or(score)
            }
        }
    }

    /// The token at `la` does not fit `ctx`: either insert `ctx` or drop the
    /// token. Removal must be strictly better to win.
    fn mismatch(
        &self,
        ctx: Ctx,
        rest: &Continuation,
        la: usize,
        depth: usize,
        score: Score,
    ) -> Score {
        let inserted = self.insert(ctx, rest, la, depth, score);
        if self.token(la) == SyntaxKind::Eof {
            return inserted;
        }
        let removed = self.seek(&cons(ctx, rest), la + 1, depth + 1, score.reached(la + 1));
        if removed.matches > inserted.matches { removed } else { inserted }
    }

    /// Synthesize the start of `ctx` and continue with whatever follows.
    fn insert(
        &self,
        ctx: Ctx,
        rest: &Continuation,
        la: usize,
        depth: usize,
        score: Score,
    ) -> Score {
        if ctx.insertable() {
            return self.seek(rest, la, depth + 1, score);
        }
        match ctx.rule() {
            Rule::Seq(items) => match items.split_first() {
                Some((&first, tail)) => self.insert(first, &prepend(tail, rest), la, depth, score),
                None => self.seek(rest, la, depth, score),
            },
            Rule::Alt(alts) => alts
                .iter()
                .filter(|alt| !matches!(alt.rule(), Rule::Empty))
                .fold(None, |best, &alt| better(best, self.insert(alt, rest, la, depth, score)))
                .unwrap_or(score),
            Rule::Many(_) | Rule::Empty => self.seek(rest, la, depth, score),
            // The end of file cannot be synthesized.
            Rule::Token(..) => score,
        }
    }
}

/// All ways to start `ctx` with an insertion: the inserted context, the
/// alternative of `ctx` it lives in, and what follows it.
fn insertions(ctx: Ctx, continuation: &Continuation) -> Vec<(Ctx, Option<Ctx>, Continuation)> {
    fn walk(
        ctx: Ctx,
        alt: Option<Ctx>,
        rest: Continuation,
        out: &mut Vec<(Ctx, Option<Ctx>, Continuation)>,
    ) {
        if ctx.insertable() {
            out.push((ctx, alt, rest));
            return;
        }
        match ctx.rule() {
            Rule::Seq(items) => {
                if let Some((&first, tail)) = items.split_first() {
                    walk(first, alt, prepend(tail, &rest), out);
                }
            }
            Rule::Alt(alts) => {
                for &option in alts {
                    if !matches!(option.rule(), Rule::Empty) {
                        walk(option, alt, rest.clone(), out);
                    }
                }
            }
            Rule::Many(_) | Rule::Empty => {
                if let Some(link) = rest {
                    walk(link.ctx, alt, link.next.clone(), out);
                }
            }
            Rule::Token(..) => {}
        }
    }

    let mut out = vec![];
    match ctx.rule() {
        Rule::Alt(alts) if !ctx.is_whole() => {
            for &option in alts {
                if !matches!(option.rule(), Rule::Empty) {
                    walk(option, Some(option), continuation.clone(), &mut out);
                }
            }
        }
        _ => walk(ctx, None, continuation.clone(), &mut out),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use SyntaxKind::*;

    fn cont(items: &[Ctx]) -> Continuation {
        prepend(items, &None)
    }

    #[test]
    fn test_missing_type_then_brace() {
        let rest = cont(&[Ctx::FuncBody, Ctx::ModuleMembers, Ctx::EndOfFile]);
        let tokens = [Eof];
        let recovery = Recovery::new(&tokens, 5);
        let solution = recovery.solve(Ctx::TypeDesc, &rest);
        assert_eq!(solution.fix, Fix::Insert { ctx: Ctx::TypeDesc, kind: Ident, alt: None });

        let rest = cont(&[Ctx::ModuleMembers, Ctx::EndOfFile]);
        let solution = recovery.solve(Ctx::FuncBody, &rest);
        assert_eq!(
            solution.fix,
            Fix::Insert {
                ctx: Ctx::OpenBrace,
                kind: OpenBrace,
                alt: Some(Ctx::FuncBodyBlock),
            }
        );
    }

    #[test]
    fn test_insert_expression_before_semicolon() {
        let rest = cont(&[Ctx::Semicolon, Ctx::ModuleMembers, Ctx::EndOfFile]);
        let tokens = [Semicolon, Eof];
        let solution = Recovery::new(&tokens, 5).solve(Ctx::Expression, &rest);
        assert_eq!(solution.fix, Fix::Insert { ctx: Ctx::Expression, kind: Ident, alt: None });
        assert_eq!(solution.matches, 2);
    }

    #[test]
    fn test_remove_stray_token() {
        // `int x = 1 2;`
        let rest = cont(&[Ctx::ModuleMembers, Ctx::EndOfFile]);
        let tokens = [Int, Semicolon, Eof];
        let solution = Recovery::new(&tokens, 5).solve(Ctx::Semicolon, &rest);
        assert_eq!(solution.fix, Fix::Remove);
    }

    #[test]
    fn test_insert_wins_ties() {
        let rest = cont(&[Ctx::EndOfFile]);
        let tokens = [Comma, Eof];
        let solution = Recovery::new(&tokens, 5).solve(Ctx::Semicolon, &rest);
        assert_eq!(solution.fix, Fix::Insert { ctx: Ctx::Semicolon, kind: Semicolon, alt: None });
    }

    #[test]
    fn test_lookahead_is_bounded() {
        let tokens = vec![Comma; 64];
        for limit in [1, 3, 5, 8] {
            let rest = cont(&[Ctx::Stmts, Ctx::CloseBrace, Ctx::EndOfFile]);
            let solution = Recovery::new(&tokens, limit).solve(Ctx::Expression, &rest);
            assert!(solution.lookahead <= limit);
            assert!(solution.matches <= limit);
        }
    }

    #[test]
    fn test_predict_var_decl_or_expression() {
        let rest = cont(&[Ctx::Stmts, Ctx::CloseBrace]);
        let tokens = [Ident, Ident, Assign, Int, Semicolon, CloseBrace];
        let recovery = Recovery::new(&tokens, 6);
        assert_eq!(recovery.predict(Ctx::VarDeclOrExprStmt, &rest), Ctx::LocalVarDecl);

        let tokens = [Ident, OpenParen, CloseParen, Semicolon, CloseBrace];
        let recovery = Recovery::new(&tokens, 6);
        assert_eq!(recovery.predict(Ctx::VarDeclOrExprStmt, &rest), Ctx::ExprLedStmt);
    }
}
