use std::collections::VecDeque;

use ecow::EcoVec;
use serde::{Deserialize, Serialize};

use crate::grammar::{Ctx, Rule};
use crate::lexer::{LexMode, LexState, Lexer};
use crate::recovery::{Continuation, Fix, Recovery, Solution, prepend};
use crate::reparser::Reuse;
use crate::set::{self, SyntaxSet, syntax_set};
use crate::{DiagnosticCode, Minutia, SyntaxDiagnostic, SyntaxKind, SyntaxNode};

/// Limits of the parser.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseConfig {
    /// How many tokens error recovery may look ahead.
    pub lookahead_limit: usize,
    /// How many grammar contexts may be open at once before the parser stops
    /// descending.
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { lookahead_limit: 5, max_depth: 128 }
    }
}

/// Parses a compilation unit.
pub fn parse(text: &str) -> SyntaxNode {
    parse_with(text, ParseConfig::default())
}

/// Parses a compilation unit with custom limits.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse_with(text: &str, config: ParseConfig) -> SyntaxNode {
    let mut p = Parser::new(text, config, None);
    compilation_unit(&mut p);
    p.finish_into(SyntaxKind::CompilationUnit)
}

/// Parses a compilation unit, taking unchanged subtrees from a previous parse.
pub(crate) fn parse_reusing(text: &str, config: ParseConfig, reuse: Reuse) -> SyntaxNode {
    let mut p = Parser::new(text, config, Some(reuse));
    compilation_unit(&mut p);
    p.finish_into(SyntaxKind::CompilationUnit)
}

/// Parses a single statement.
pub fn parse_statement(text: &str) -> SyntaxNode {
    fragment(text, Ctx::StatementEntry, |p| {
        p.recover(Ctx::Statement);
        statement(p);
    })
}

/// Parses a single expression.
pub fn parse_expression(text: &str) -> SyntaxNode {
    fragment(text, Ctx::ExpressionEntry, expression)
}

/// Parses a single type descriptor.
pub fn parse_type_desc(text: &str) -> SyntaxNode {
    fragment(text, Ctx::TypeDescEntry, type_desc)
}

/// Parses a fragment followed by the end of the text.
fn fragment(text: &str, entry: Ctx, f: impl FnOnce(&mut Parser)) -> SyntaxNode {
    let mut p = Parser::new(text, ParseConfig::default(), None);
    p.enter(entry, |p| {
        f(p);
        end(p);
    });
    p.finish_into(SyntaxKind::Fragment)
}

/// Kinds of reusable top-level declarations.
const TOP_LEVEL: SyntaxSet = syntax_set!(
    FunctionDefinition,
    TypeDefinition,
    ModuleVarDecl,
    ConstantDecl,
    ListenerDecl,
    EnumDecl,
    ServiceDecl,
);

/// Kinds of reusable statements.
const STATEMENT: SyntaxSet = syntax_set!(
    LocalVarDecl,
    Assignment,
    CompoundAssignment,
    CallStatement,
    IfElse,
    While,
    Foreach,
    Lock,
    Return,
    Break,
    Continue,
    Panic,
    Fail,
    MatchStatement,
    Block,
);

/// The precedence of prefix operators.
const UNARY_PREC: usize = 13;

/// Parses a whole file: imports, then module members.
fn compilation_unit(p: &mut Parser) {
    p.enter(Ctx::CompUnit, |p| {
        let m = p.marker();
        while p.at(SyntaxKind::ImportKw) {
            if !p.reuse(Ctx::ImportDecl, syntax_set!(ImportDecl)) {
                import_decl(p);
            }
        }
        p.wrap(m, SyntaxKind::List);

        let m = p.marker();
        list(p, Ctx::ModuleMembers, SyntaxSet::new(), |p| {
            let kinds = if p.seen_decl {
                TOP_LEVEL
            } else {
                TOP_LEVEL.add(SyntaxKind::ImportDecl)
            };
            if !p.reuse(Ctx::ModuleMember, kinds) {
                module_member(p);
            }
        });
        p.wrap(m, SyntaxKind::List);
        end(p);
    });
}

/// Skips whatever is left and eats the end of file.
fn end(p: &mut Parser) {
    while !p.at(SyntaxKind::Eof) {
        p.remove();
    }
    p.eat_as(Ctx::EndOfFile);
}

/// Parses a module-level declaration with its metadata.
fn module_member(p: &mut Parser) {
    if p.at(SyntaxKind::ImportKw) {
        import_decl(p);
        if p.seen_decl {
            p.annotate_last(SyntaxDiagnostic::error(DiagnosticCode::ImportAfterDecl));
        }
        return;
    }

    let m = p.marker();
    metadata(p);
    if p.at(SyntaxKind::PublicKw) {
        p.eat_as(Ctx::PublicQual);
    }

    let kind = match p.current() {
        SyntaxKind::FunctionKw if function_def_ahead(p) => {
            func_def(p);
            SyntaxKind::FunctionDefinition
        }
        SyntaxKind::TypeKw => {
            type_def(p);
            SyntaxKind::TypeDefinition
        }
        SyntaxKind::ConstKw => {
            const_decl(p, Ctx::ConstDecl, Ctx::ConstKw);
            SyntaxKind::ConstantDecl
        }
        SyntaxKind::ListenerKw => {
            const_decl(p, Ctx::ListenerDecl, Ctx::ListenerKw);
            SyntaxKind::ListenerDecl
        }
        SyntaxKind::EnumKw => {
            enum_decl(p);
            SyntaxKind::EnumDecl
        }
        SyntaxKind::ServiceKw => {
            service_decl(p);
            SyntaxKind::ServiceDecl
        }
        _ => {
            var_decl(p, Ctx::ModuleVarDecl);
            SyntaxKind::ModuleVarDecl
        }
    };
    p.wrap(m, kind);
    p.seen_decl = true;
}

/// Whether the `function` keyword starts a definition rather than a
/// variable of function type.
fn function_def_ahead(p: &mut Parser) -> bool {
    match p.peek(1) {
        SyntaxKind::Ident => true,
        SyntaxKind::OpenParen => false,
        _ => p.predict(Ctx::FuncDefOrVar) == Ctx::FuncDef,
    }
}

/// Parses an import declaration: `import org/a.b version 1.2 as c;`.
fn import_decl(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::ImportDecl, |p| {
        p.eat_as(Ctx::ImportKw);
        p.enter_mode(LexMode::Import, |p| {
            if p.at(SyntaxKind::Ident) && p.peek(1) == SyntaxKind::Slash {
                let m = p.marker();
                p.enter(Ctx::ImportOrg, |p| {
                    p.eat_as(Ctx::OrgName);
                    p.eat_as(Ctx::Slash);
                });
                p.wrap(m, SyntaxKind::ImportOrgName);
            }

            let name = p.marker();
            p.enter(Ctx::ImportModuleName, |p| {
                p.expect(Ctx::ModuleNamePart);
                while p.at(SyntaxKind::Dot) {
                    p.enter(Ctx::ModuleNameSuffix, |p| {
                        p.eat_as(Ctx::Dot);
                        p.expect(Ctx::ModuleNamePart);
                    });
                }
            });
            p.wrap(name, SyntaxKind::List);

            if p.at(SyntaxKind::VersionKw) {
                let m = p.marker();
                p.enter(Ctx::ImportVersion, |p| {
                    p.eat_as(Ctx::VersionKw);
                    p.expect(Ctx::VersionNumber);
                    while p.at(SyntaxKind::Dot) {
                        p.enter(Ctx::VersionSuffix, |p| {
                            p.eat_as(Ctx::Dot);
                            p.expect(Ctx::VersionNumber);
                        });
                    }
                });
                p.wrap(m, SyntaxKind::ImportVersion);
            }

            if p.at(SyntaxKind::AsKw) {
                let m = p.marker();
                p.enter(Ctx::ImportPrefix, |p| {
                    p.eat_as(Ctx::AsKw);
                    p.expect(Ctx::ImportPrefixName);
                });
                p.wrap(m, SyntaxKind::ImportPrefix);
            }

            p.expect(Ctx::Semicolon);
        });
    });
    p.wrap(m, SyntaxKind::ImportDecl);
}

/// Parses documentation and annotations in front of a declaration.
fn metadata(p: &mut Parser) {
    if !p.at_set(syntax_set!(DocString, At)) {
        return;
    }

    let m = p.marker();
    if p.at(SyntaxKind::DocString) {
        p.eat_as(Ctx::DocString);
    }
    annotations(p);
    p.wrap(m, SyntaxKind::Metadata);
}

fn annotations(p: &mut Parser) {
    while p.at(SyntaxKind::At) {
        annotation(p);
    }
}

/// Parses an annotation: `@http:ServiceConfig { cors: true }`.
fn annotation(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::Annotation, |p| {
        p.eat_as(Ctx::At);
        name_ref(p);
        if p.at(SyntaxKind::OpenBrace) {
            mapping_ctor(p);
        }
    });
    p.wrap(m, SyntaxKind::Annotation);
}

/// Parses a type definition: `type Id int|string;`.
fn type_def(p: &mut Parser) {
    p.enter(Ctx::TypeDef, |p| {
        p.eat_as(Ctx::TypeKw);
        p.expect(Ctx::TypeName);
        type_desc(p);
        p.expect(Ctx::Semicolon);
    });
}

/// Parses a constant or listener declaration, where the type is optional.
fn const_decl(p: &mut Parser, ctx: Ctx, keyword: Ctx) {
    p.enter(ctx, |p| {
        p.eat_as(keyword);
        if !(p.at(SyntaxKind::Ident) && p.peek(1) == SyntaxKind::Assign) {
            type_desc(p);
        }
        p.expect(Ctx::ConstName);
        initializer(p);
        p.expect(Ctx::Semicolon);
    });
}

/// Parses an enum declaration: `enum Color { RED, GREEN = "g" }`.
fn enum_decl(p: &mut Parser) {
    p.enter(Ctx::EnumDecl, |p| {
        p.eat_as(Ctx::EnumKw);
        p.expect(Ctx::EnumName);
        let opened = p.expect(Ctx::OpenBrace);
        let members = p.marker();
        separated(p, Ctx::EnumMembers, syntax_set!(CloseBrace), |p| {
            let m = p.marker();
            p.enter(Ctx::EnumMember, |p| {
                p.expect(Ctx::EnumMemberName);
                if p.at(SyntaxKind::Assign) {
                    initializer(p);
                }
            });
            p.wrap(m, SyntaxKind::EnumMember);
        });
        p.wrap(members, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBrace, opened);
    });
}

/// Parses a service declaration: `service hello on ep, ep2 { ... }`.
fn service_decl(p: &mut Parser) {
    p.enter(Ctx::ServiceDecl, |p| {
        p.eat_as(Ctx::ServiceKw);
        if p.at(SyntaxKind::Ident) && p.peek(1) == SyntaxKind::OnKw {
            p.eat_as(Ctx::ServiceName);
        }
        p.expect(Ctx::OnKw);

        let listeners = p.marker();
        p.enter(Ctx::Listeners, |p| {
            expression(p);
            while p.at(SyntaxKind::Comma) {
                p.enter(Ctx::ListenerMore, |p| {
                    p.eat_as(Ctx::Comma);
                    expression(p);
                });
            }
        });
        p.wrap(listeners, SyntaxKind::List);

        p.enter(Ctx::ServiceBody, |p| {
            let opened = p.expect(Ctx::OpenBrace);
            let members = p.marker();
            list(p, Ctx::ObjectMembers, syntax_set!(CloseBrace), object_member);
            p.wrap(members, SyntaxKind::List);
            p.expect_closing(Ctx::CloseBrace, opened);
        });
    });
}

/// Parses a module-level or local variable declaration: `final int x = 1;`.
fn var_decl(p: &mut Parser, ctx: Ctx) {
    p.enter(ctx, |p| {
        if p.at(SyntaxKind::FinalKw) {
            p.eat_as(Ctx::FinalKw);
        }
        if p.at(SyntaxKind::VarKw) {
            p.eat_as(Ctx::VarKw);
        } else {
            type_desc(p);
        }
        p.expect(Ctx::VarName);
        if p.at(SyntaxKind::Assign) {
            initializer(p);
        }
        p.expect(Ctx::Semicolon);
    });
}

fn initializer(p: &mut Parser) {
    p.enter(Ctx::Initializer, |p| {
        p.expect(Ctx::AssignOp);
        expression(p);
    });
}

/// Parses a function definition.
fn func_def(p: &mut Parser) {
    p.enter(Ctx::FuncDef, |p| {
        p.eat_as(Ctx::FunctionKw);
        p.expect(Ctx::FuncName);
        signature(p);
        func_body(p);
    });
}

/// Parses parameters and the return type: `(int a, string... b) returns int`.
fn signature(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::FuncSignature, |p| {
        let opened = p.expect(Ctx::OpenParen);
        let params = p.marker();
        separated(p, Ctx::Params, syntax_set!(CloseParen), param);
        p.wrap(params, SyntaxKind::List);
        p.expect_closing(Ctx::CloseParen, opened);

        if p.at(SyntaxKind::ReturnsKw) {
            let m = p.marker();
            p.enter(Ctx::Returns, |p| {
                p.eat_as(Ctx::ReturnsKw);
                annotations(p);
                type_desc(p);
            });
            p.wrap(m, SyntaxKind::ReturnTypeDesc);
        }
    });
    p.wrap(m, SyntaxKind::FunctionSignature);
}

/// Parses a single parameter. Names are optional in function types.
fn param(p: &mut Parser) {
    let m = p.marker();
    let mut kind = SyntaxKind::RequiredParam;
    p.enter(Ctx::Param, |p| {
        annotations(p);
        type_desc(p);
        if p.at(SyntaxKind::Ellipsis) {
            kind = SyntaxKind::RestParam;
            p.enter(Ctx::RestParam, |p| {
                p.eat_as(Ctx::Ellipsis);
                if p.at(SyntaxKind::Ident) {
                    p.eat_as(Ctx::ParamName);
                }
            });
        } else if p.at(SyntaxKind::Ident) {
            p.enter(Ctx::NamedParam, |p| {
                p.eat_as(Ctx::ParamName);
                if p.at(SyntaxKind::Assign) {
                    kind = SyntaxKind::DefaultableParam;
                    p.enter(Ctx::ParamDefault, |p| {
                        p.eat_as(Ctx::AssignOp);
                        expression(p);
                    });
                }
            });
        }
    });
    p.wrap(m, kind);
}

/// Parses a function body: a block, `= external;` or `=> expr;`.
fn func_body(p: &mut Parser) {
    const BODIES: SyntaxSet =
        syntax_set!(FunctionBodyBlock, ExternalFunctionBody, ExpressionFunctionBody);
    if p.at_set(syntax_set!(OpenBrace, Assign, RightDoubleArrow))
        && p.reuse(Ctx::FuncBody, BODIES)
    {
        return;
    }

    let alt = match p.recover(Ctx::FuncBody) {
        None => match p.current() {
            SyntaxKind::Assign => Ctx::ExternalBody,
            SyntaxKind::RightDoubleArrow => Ctx::ExprBody,
            _ => Ctx::FuncBodyBlock,
        },
        Some(Fix::Insert { alt: Some(alt), .. }) => alt,
        Some(_) => Ctx::FuncBodyBlock,
    };

    let m = p.marker();
    match alt {
        Ctx::ExternalBody => {
            p.enter(alt, |p| {
                p.expect(Ctx::AssignOp);
                annotations(p);
                p.expect(Ctx::ExternalKw);
                p.expect(Ctx::Semicolon);
            });
            p.wrap(m, SyntaxKind::ExternalFunctionBody);
        }
        Ctx::ExprBody => {
            p.enter(alt, |p| {
                p.expect(Ctx::RightDoubleArrow);
                expression(p);
                p.expect(Ctx::Semicolon);
            });
            p.wrap(m, SyntaxKind::ExpressionFunctionBody);
        }
        _ => braced(p, Ctx::FuncBodyBlock, SyntaxKind::FunctionBodyBlock),
    }
}

/// Parses a block statement.
fn block(p: &mut Parser) {
    braced(p, Ctx::Block, SyntaxKind::Block);
}

/// Parses statements in braces.
fn braced(p: &mut Parser, ctx: Ctx, kind: SyntaxKind) {
    let m = p.marker();
    p.enter(ctx, |p| {
        let opened = p.expect(Ctx::OpenBrace);
        let stmts = p.marker();
        list(p, Ctx::Stmts, syntax_set!(CloseBrace), |p| {
            if !p.reuse(Ctx::Statement, STATEMENT) {
                statement(p);
            }
        });
        p.wrap(stmts, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBrace, opened);
    });
    p.wrap(m, kind);
}

/// Parses a statement.
fn statement(p: &mut Parser) {
    let m = p.marker();
    let kind = match p.current() {
        SyntaxKind::OpenBrace => return block(p),
        SyntaxKind::IfKw => return if_else(p),
        SyntaxKind::WhileKw => {
            p.enter(Ctx::While, |p| {
                p.eat_as(Ctx::WhileKw);
                expression(p);
                block(p);
            });
            SyntaxKind::While
        }
        SyntaxKind::ForeachKw => {
            foreach(p);
            SyntaxKind::Foreach
        }
        SyntaxKind::LockKw => {
            p.enter(Ctx::Lock, |p| {
                p.eat_as(Ctx::LockKw);
                block(p);
            });
            SyntaxKind::Lock
        }
        SyntaxKind::ReturnKw => {
            p.enter(Ctx::Return, |p| {
                p.eat_as(Ctx::ReturnKw);
                if p.at_first(Ctx::Expression) {
                    expression(p);
                }
                p.expect(Ctx::Semicolon);
            });
            SyntaxKind::Return
        }
        SyntaxKind::BreakKw => {
            keyword_stmt(p, Ctx::Break, Ctx::BreakKw, false);
            SyntaxKind::Break
        }
        SyntaxKind::ContinueKw => {
            keyword_stmt(p, Ctx::Continue, Ctx::ContinueKw, false);
            SyntaxKind::Continue
        }
        SyntaxKind::PanicKw => {
            keyword_stmt(p, Ctx::Panic, Ctx::PanicKw, true);
            SyntaxKind::Panic
        }
        SyntaxKind::FailKw => {
            keyword_stmt(p, Ctx::Fail, Ctx::FailKw, true);
            SyntaxKind::Fail
        }
        SyntaxKind::MatchKw => {
            match_stmt(p);
            SyntaxKind::MatchStatement
        }
        _ if var_decl_ahead(p) => {
            var_decl(p, Ctx::LocalVarDecl);
            SyntaxKind::LocalVarDecl
        }
        _ => return expr_stmt(p),
    };
    p.wrap(m, kind);
}

/// Parses `break;`, `continue;`, `panic e;` and `fail e;`.
fn keyword_stmt(p: &mut Parser, ctx: Ctx, keyword: Ctx, operand: bool) {
    p.enter(ctx, |p| {
        p.eat_as(keyword);
        if operand {
            expression(p);
        }
        p.expect(Ctx::Semicolon);
    });
}

/// Parses an if-else statement: `if a { } else if b { } else { }`.
fn if_else(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::IfElse, |p| {
        p.expect(Ctx::IfKw);
        expression(p);
        block(p);
        if p.at(SyntaxKind::ElseKw) {
            let m = p.marker();
            p.enter(Ctx::ElseClause, |p| {
                p.eat_as(Ctx::ElseKw);
                if p.at(SyntaxKind::IfKw) {
                    if_else(p);
                } else {
                    block(p);
                }
            });
            p.wrap(m, SyntaxKind::ElseClause);
        }
    });
    p.wrap(m, SyntaxKind::IfElse);
}

/// Parses a foreach loop: `foreach int i in 0..<n { }`.
fn foreach(p: &mut Parser) {
    p.enter(Ctx::Foreach, |p| {
        p.eat_as(Ctx::ForeachKw);
        if p.at(SyntaxKind::VarKw) {
            p.eat_as(Ctx::VarKw);
        } else {
            type_desc(p);
        }
        p.expect(Ctx::VarName);
        p.expect(Ctx::InKw);
        expression(p);
        block(p);
    });
}

/// Parses a match statement: `match x { 0|1 => { } var y if y > 1 => { } }`.
fn match_stmt(p: &mut Parser) {
    p.enter(Ctx::Match, |p| {
        p.eat_as(Ctx::MatchKw);
        expression(p);
        let opened = p.expect(Ctx::OpenBrace);
        let clauses = p.marker();
        list(p, Ctx::MatchClauses, syntax_set!(CloseBrace), match_clause);
        p.wrap(clauses, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBrace, opened);
    });
}

fn match_clause(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::MatchClause, |p| {
        let patterns = p.marker();
        p.enter(Ctx::MatchPatterns, |p| {
            match_pattern(p);
            while p.at(SyntaxKind::Pipe) {
                p.enter(Ctx::MatchPatternMore, |p| {
                    p.eat_as(Ctx::Pipe);
                    match_pattern(p);
                });
            }
        });
        p.wrap(patterns, SyntaxKind::List);

        if p.at(SyntaxKind::IfKw) {
            let m = p.marker();
            p.enter(Ctx::MatchGuard, |p| {
                p.eat_as(Ctx::IfKw);
                expression(p);
            });
            p.wrap(m, SyntaxKind::MatchGuard);
        }
        p.expect(Ctx::RightDoubleArrow);
        block(p);
    });
    p.wrap(m, SyntaxKind::MatchClause);
}

/// Parses a match pattern: a constant, `var x`, or a list or mapping of
/// patterns.
fn match_pattern(p: &mut Parser) {
    if !p.at_or_recover(Ctx::MatchPattern) {
        return;
    }

    let m = p.marker();
    let kind = match p.current() {
        SyntaxKind::Ident => return name_ref(p),
        SyntaxKind::VarKw => {
            p.enter(Ctx::VarPattern, |p| {
                p.eat_as(Ctx::VarKw);
                p.expect(Ctx::VarName);
            });
            SyntaxKind::VarMatchPattern
        }
        SyntaxKind::OpenBracket => {
            p.enter(Ctx::ListPattern, |p| {
                p.eat_as(Ctx::OpenBracket);
                let items = p.marker();
                separated(p, Ctx::ListPatternItems, syntax_set!(CloseBracket), |p| {
                    if p.at(SyntaxKind::Ellipsis) {
                        rest_pattern(p);
                    } else {
                        match_pattern(p);
                    }
                });
                p.wrap(items, SyntaxKind::List);
                p.expect_closing(Ctx::CloseBracket, true);
            });
            SyntaxKind::ListMatchPattern
        }
        SyntaxKind::OpenBrace => {
            p.enter(Ctx::MappingPattern, |p| {
                p.eat_as(Ctx::OpenBrace);
                let fields = p.marker();
                separated(p, Ctx::FieldPatterns, syntax_set!(CloseBrace), field_pattern);
                p.wrap(fields, SyntaxKind::List);
                p.expect_closing(Ctx::CloseBrace, true);
            });
            SyntaxKind::MappingMatchPattern
        }
        SyntaxKind::Minus => {
            p.enter(Ctx::NegativeLiteral, |p| {
                p.eat_as(Ctx::MinusSign);
                p.expect(Ctx::Literal);
            });
            SyntaxKind::UnaryExpr
        }
        _ => {
            p.eat_as(Ctx::Literal);
            SyntaxKind::BasicLiteral
        }
    };
    p.wrap(m, kind);
}

/// Parses a field of a mapping match pattern: `name: pattern`.
fn field_pattern(p: &mut Parser) {
    if p.at(SyntaxKind::Ellipsis) {
        return rest_pattern(p);
    }

    let m = p.marker();
    p.enter(Ctx::FieldPattern, |p| {
        p.expect(Ctx::FieldName);
        p.expect(Ctx::Colon);
        match_pattern(p);
    });
    p.wrap(m, SyntaxKind::FieldMatchPattern);
}

/// Parses the rest of a list or mapping match pattern: `...var rest`.
fn rest_pattern(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::RestPattern, |p| {
        p.eat_as(Ctx::Ellipsis);
        p.expect(Ctx::VarKw);
        p.expect(Ctx::VarName);
    });
    p.wrap(m, SyntaxKind::RestMatchPattern);
}

/// Whether the statement at hand declares a variable rather than starting
/// with an expression.
fn var_decl_ahead(p: &mut Parser) -> bool {
    match p.current() {
        SyntaxKind::StringKw | SyntaxKind::XmlKw => p.peek(1) != SyntaxKind::Backtick,
        SyntaxKind::ErrorKw => p.peek(1) != SyntaxKind::OpenParen,
        SyntaxKind::FinalKw
        | SyntaxKind::VarKw
        | SyntaxKind::RecordKw
        | SyntaxKind::ObjectKw
        | SyntaxKind::MapKw
        | SyntaxKind::DistinctKw
        | SyntaxKind::FunctionKw => true,
        kind if kind.is_builtin_type()
            || set::PARAMETERIZED_TYPE.contains(kind)
            || set::OBJECT_QUAL.contains(kind) =>
        {
            true
        }
        SyntaxKind::Ident => match p.peek(1) {
            SyntaxKind::Ident => true,
            SyntaxKind::Colon if qualified_ahead(p) => p.peek(3) == SyntaxKind::Ident,
            SyntaxKind::Assign
            | SyntaxKind::OpenParen
            | SyntaxKind::Dot
            | SyntaxKind::OptionalChaining
            | SyntaxKind::AnnotChaining
            | SyntaxKind::Semicolon => false,
            kind if set::COMPOUND_OP.contains(kind) && p.peek(2) == SyntaxKind::Assign => {
                false
            }
            _ => p.predict(Ctx::VarDeclOrExprStmt) == Ctx::LocalVarDecl,
        },
        SyntaxKind::OpenParen | SyntaxKind::OpenBracket => {
            p.predict(Ctx::VarDeclOrExprStmt) == Ctx::LocalVarDecl
        }
        _ => false,
    }
}

/// Parses a statement that starts with an expression: an assignment, a
/// compound assignment or a call.
fn expr_stmt(p: &mut Parser) {
    let m = p.marker();
    let mut kind = SyntaxKind::ExpressionStatement;
    let mut reported = false;
    p.enter(Ctx::ExprLedStmt, |p| {
        expression(p);
        let callee = p.nodes.last();
        reported = callee.is_some_and(SyntaxNode::erroneous);
        let call = callee.is_some_and(|node| {
            matches!(
                node.kind(),
                SyntaxKind::FuncCall | SyntaxKind::MethodCall | SyntaxKind::CheckExpr
            )
        });

        match p.current() {
            SyntaxKind::Assign => {
                kind = SyntaxKind::Assignment;
                p.enter(Ctx::AssignRhs, |p| {
                    p.eat_as(Ctx::AssignOp);
                    expression(p);
                });
            }
            op if set::COMPOUND_OP.contains(op) && p.peek(1) == SyntaxKind::Assign => {
                kind = SyntaxKind::CompoundAssignment;
                p.enter(Ctx::CompoundRhs, |p| {
                    p.eat_as(Ctx::CompoundOp);
                    p.eat_as(Ctx::AssignOp);
                    expression(p);
                });
            }
            _ if call => kind = SyntaxKind::CallStatement,
            _ => {}
        }
        p.expect(Ctx::Semicolon);
    });
    p.wrap(m, kind);

    // A missing expression has already been reported.
    if kind == SyntaxKind::ExpressionStatement && !reported {
        p.annotate_last(SyntaxDiagnostic::error(DiagnosticCode::InvalidExpressionStatement));
    }
}

/// Parses an expression.
fn expression(p: &mut Parser) {
    expr_prec(p, 0);
}

/// Parses an expression with at least the given precedence.
fn expr_prec(p: &mut Parser, min_prec: usize) {
    if p.at_or_recover(Ctx::Expression) {
        p.enter(Ctx::Expression, |p| expr_inner(p, min_prec));
    }
}

fn expr_inner(p: &mut Parser, min_prec: usize) {
    let m = p.marker();
    match p.current() {
        kind if set::UNARY_OP.contains(kind) => {
            prefixed(p, m, Ctx::UnaryExpr, Ctx::UnaryOp, SyntaxKind::UnaryExpr)
        }
        SyntaxKind::CheckKw | SyntaxKind::CheckPanicKw => {
            prefixed(p, m, Ctx::CheckExpr, Ctx::CheckKw, SyntaxKind::CheckExpr)
        }
        SyntaxKind::TrapKw => prefixed(p, m, Ctx::TrapExpr, Ctx::TrapKw, SyntaxKind::TrapExpr),
        SyntaxKind::TypeofKw => {
            prefixed(p, m, Ctx::TypeofExpr, Ctx::TypeofKw, SyntaxKind::TypeofExpr)
        }
        SyntaxKind::Lt => {
            p.enter(Ctx::TypeCast, |p| {
                p.eat_as(Ctx::AngleOpen);
                type_desc(p);
                p.expect(Ctx::AngleClose);
                expr_prec(p, UNARY_PREC);
            });
            p.wrap(m, SyntaxKind::TypeCastExpr);
        }
        _ => {
            primary(p);
            postfix(p, m);
        }
    }

    while let Some((prec, width)) = binary_op(p) {
        if prec < min_prec {
            break;
        }

        match p.current() {
            SyntaxKind::QuestionMark => {
                p.enter(Ctx::ConditionalRhs, |p| {
                    p.eat_as(Ctx::QuestionMark);
                    expression(p);
                    p.expect(Ctx::Colon);
                    expression(p);
                });
                p.wrap(m, SyntaxKind::ConditionalExpr);
            }
            SyntaxKind::IsKw => {
                p.enter(Ctx::IsRhs, |p| {
                    p.eat_as(Ctx::IsKw);
                    type_desc(p);
                });
                p.wrap(m, SyntaxKind::TypeTestExpr);
            }
            _ => {
                p.enter(Ctx::BinaryRhs, |p| {
                    p.eat_as(Ctx::BinaryOp);
                    for _ in 1..width {
                        p.eat();
                    }
                    expr_prec(p, prec + 1);
                });
                p.wrap(m, SyntaxKind::BinaryExpr);
            }
        }
    }
}

/// Parses a prefix operator or keyword and its operand.
fn prefixed(p: &mut Parser, m: Marker, ctx: Ctx, op: Ctx, kind: SyntaxKind) {
    p.enter(ctx, |p| {
        p.eat_as(op);
        expr_prec(p, UNARY_PREC);
    });
    p.wrap(m, kind);
}

/// The binary operator at the current position: its precedence and how many
/// tokens it spans. Shifts to the right are made of adjacent `>` tokens.
fn binary_op(p: &mut Parser) -> Option<(usize, usize)> {
    let kind = p.current();
    if set::COMPOUND_OP.contains(kind) && p.peek(1) == SyntaxKind::Assign && p.adjacent(0)
    {
        return None;
    }

    let prec = match kind {
        SyntaxKind::Asterisk | SyntaxKind::Slash | SyntaxKind::Percent => 12,
        SyntaxKind::Plus | SyntaxKind::Minus => 11,
        SyntaxKind::DoubleLt => 10,
        SyntaxKind::Gt if p.peek(1) == SyntaxKind::Gt && p.adjacent(0) => {
            let width = if p.peek(2) == SyntaxKind::Gt && p.adjacent(1) { 3 } else { 2 };
            return Some((10, width));
        }
        SyntaxKind::Ellipsis | SyntaxKind::DoubleDotLt => 9,
        SyntaxKind::Lt
        | SyntaxKind::LtEq
        | SyntaxKind::Gt
        | SyntaxKind::GtEq
        | SyntaxKind::IsKw => 8,
        SyntaxKind::EqEq | SyntaxKind::NotEq | SyntaxKind::EqEqEq | SyntaxKind::NotEqEq => 7,
        SyntaxKind::BitAnd => 6,
        SyntaxKind::BitXor => 5,
        SyntaxKind::Pipe => 4,
        SyntaxKind::LogicalAnd => 3,
        SyntaxKind::LogicalOr => 2,
        SyntaxKind::Elvis => 1,
        SyntaxKind::QuestionMark => 0,
        _ => return None,
    };

    Some((prec, 1))
}

/// Parses calls, member accesses and indexing after a primary.
fn postfix(p: &mut Parser, m: Marker) {
    loop {
        match p.current() {
            SyntaxKind::OpenParen => {
                call_args(p);
                p.wrap(m, SyntaxKind::FuncCall);
            }
            SyntaxKind::OpenBracket => {
                p.enter(Ctx::IndexSuffix, |p| {
                    p.eat_as(Ctx::OpenBracket);
                    expression(p);
                    p.expect_closing(Ctx::CloseBracket, true);
                });
                p.wrap(m, SyntaxKind::IndexedExpr);
            }
            access if set::MEMBER_ACCESS.contains(access) => {
                let mut call = false;
                p.enter(Ctx::MemberSuffix, |p| {
                    p.eat_as(Ctx::MemberAccess);
                    p.expect(Ctx::FieldName);
                    if access == SyntaxKind::Dot && p.at(SyntaxKind::OpenParen) {
                        call = true;
                        call_args(p);
                    }
                });
                let kind = match access {
                    _ if call => SyntaxKind::MethodCall,
                    SyntaxKind::Dot => SyntaxKind::FieldAccess,
                    SyntaxKind::OptionalChaining => SyntaxKind::OptionalFieldAccess,
                    _ => SyntaxKind::AnnotAccess,
                };
                p.wrap(m, kind);
            }
            SyntaxKind::DotLt => {
                p.enter(Ctx::XmlFilterSuffix, |p| {
                    p.eat_as(Ctx::DotLt);
                    xml_name_patterns(p);
                    p.expect_closing(Ctx::AngleClose, true);
                });
                p.wrap(m, SyntaxKind::XmlFilterExpr);
            }
            SyntaxKind::SlashAsterisk => {
                p.eat_as(Ctx::XmlStepAll);
                p.wrap(m, SyntaxKind::XmlStepExpr);
            }
            SyntaxKind::Slash if p.peek(1) == SyntaxKind::Lt && p.adjacent(0) => {
                p.enter(Ctx::XmlStepChildren, |p| {
                    p.eat_as(Ctx::Slash);
                    p.eat_as(Ctx::AngleOpen);
                    xml_name_patterns(p);
                    p.expect_closing(Ctx::AngleClose, true);
                });
                p.wrap(m, SyntaxKind::XmlStepExpr);
            }
            SyntaxKind::DoubleSlashDoubleAsteriskLt => {
                p.enter(Ctx::XmlStepDescendants, |p| {
                    p.eat_as(Ctx::XmlDescendantsStart);
                    xml_name_patterns(p);
                    p.expect_closing(Ctx::AngleClose, true);
                });
                p.wrap(m, SyntaxKind::XmlStepExpr);
            }
            _ => break,
        }
    }
}

/// Parses the name patterns of an XML navigation: `a|ns:b|*`.
fn xml_name_patterns(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::XmlNamePatterns, |p| {
        xml_name_pattern(p);
        while p.at(SyntaxKind::Pipe) {
            p.enter(Ctx::XmlNamePatternMore, |p| {
                p.eat_as(Ctx::Pipe);
                xml_name_pattern(p);
            });
        }
    });
    p.wrap(m, SyntaxKind::List);
}

fn xml_name_pattern(p: &mut Parser) {
    let m = p.marker();
    if p.at(SyntaxKind::Asterisk) {
        p.eat_as(Ctx::Asterisk);
    } else {
        p.enter(Ctx::XmlName, |p| {
            p.expect(Ctx::Identifier);
            if p.at(SyntaxKind::Colon) {
                p.enter(Ctx::XmlQualifiedSuffix, |p| {
                    p.eat_as(Ctx::Colon);
                    p.expect(Ctx::XmlLocalName);
                });
            }
        });
    }
    p.wrap(m, SyntaxKind::XmlNamePattern);
}

/// Parses a primary expression.
fn primary(p: &mut Parser) {
    let m = p.marker();
    match p.current() {
        kind if set::LITERAL.contains(kind) => {
            p.eat_as(Ctx::Literal);
            p.wrap(m, SyntaxKind::BasicLiteral);
        }
        SyntaxKind::Ident => name_ref(p),
        SyntaxKind::OpenParen => {
            let mut kind = SyntaxKind::NilLiteral;
            p.enter(Ctx::ParenExpr, |p| {
                p.eat_as(Ctx::OpenParen);
                if !p.at(SyntaxKind::CloseParen) {
                    kind = SyntaxKind::BracedExpr;
                    expression(p);
                }
                p.expect_closing(Ctx::CloseParen, true);
            });
            p.wrap(m, kind);
        }
        SyntaxKind::OpenBracket => list_ctor(p),
        SyntaxKind::OpenBrace => mapping_ctor(p),
        SyntaxKind::Backtick | SyntaxKind::StringKw | SyntaxKind::XmlKw => template(p),
        SyntaxKind::NewKw => {
            p.enter(Ctx::NewExpr, |p| {
                p.eat_as(Ctx::NewKw);
                if p.at(SyntaxKind::Ident) {
                    name_ref(p);
                }
                if p.at(SyntaxKind::OpenParen) {
                    call_args(p);
                }
            });
            p.wrap(m, SyntaxKind::NewExpr);
        }
        SyntaxKind::ErrorKw => {
            p.enter(Ctx::ErrorCtor, |p| {
                p.eat_as(Ctx::ErrorKw);
                call_args(p);
            });
            p.wrap(m, SyntaxKind::ErrorCtor);
        }
        _ => {
            p.locate(Ctx::Operand);
            p.missing_whole(Ctx::Expression);
        }
    }
}

/// Parses a possibly qualified name: `x` or `io:println`.
fn name_ref(p: &mut Parser) {
    let m = p.marker();
    let mut kind = SyntaxKind::SimpleNameRef;
    p.enter(Ctx::NameRef, |p| {
        let qualified = p.at(SyntaxKind::Ident) && qualified_ahead(p);
        p.expect(Ctx::Identifier);
        if qualified {
            kind = SyntaxKind::QualifiedNameRef;
            p.enter(Ctx::QualifiedSuffix, |p| {
                p.eat_as(Ctx::Colon);
                p.eat_as(Ctx::Identifier);
            });
        }
    });
    p.wrap(m, kind);
}

/// Whether the identifier at hand is directly followed by `:` and another
/// identifier. Spaces around the colon make it a separator instead.
fn qualified_ahead(p: &mut Parser) -> bool {
    p.peek(1) == SyntaxKind::Colon
        && p.peek(2) == SyntaxKind::Ident
        && p.adjacent(0)
        && p.adjacent(1)
}

/// Parses call arguments: `(a, b = 1, ...c)`.
fn call_args(p: &mut Parser) {
    p.enter(Ctx::CallSuffix, |p| {
        let opened = p.expect(Ctx::OpenParen);
        let args = p.marker();
        separated(p, Ctx::Args, syntax_set!(CloseParen), arg);
        p.wrap(args, SyntaxKind::List);
        p.expect_closing(Ctx::CloseParen, opened);
    });
}

fn arg(p: &mut Parser) {
    let m = p.marker();
    let kind = match p.current() {
        SyntaxKind::Ellipsis => {
            p.enter(Ctx::RestArg, |p| {
                p.eat_as(Ctx::Ellipsis);
                expression(p);
            });
            SyntaxKind::RestArg
        }
        SyntaxKind::Ident if p.peek(1) == SyntaxKind::Assign => {
            p.enter(Ctx::NamedArg, |p| {
                p.eat_as(Ctx::ArgName);
                p.eat_as(Ctx::AssignOp);
                expression(p);
            });
            SyntaxKind::NamedArg
        }
        _ => {
            expression(p);
            SyntaxKind::PositionalArg
        }
    };
    p.wrap(m, kind);
}

/// Parses a list constructor: `[1, 2, 3]`.
fn list_ctor(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::ListCtor, |p| {
        p.eat_as(Ctx::OpenBracket);
        let items = p.marker();
        separated(p, Ctx::ListItems, syntax_set!(CloseBracket), expression);
        p.wrap(items, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBracket, true);
    });
    p.wrap(m, SyntaxKind::ListCtor);
}

/// Parses a mapping constructor: `{a: 1, "b": 2, [k]: v, ...rest}`.
fn mapping_ctor(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::MappingCtor, |p| {
        let opened = p.expect(Ctx::OpenBrace);
        let fields = p.marker();
        separated(p, Ctx::MappingFields, syntax_set!(CloseBrace), mapping_field);
        p.wrap(fields, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBrace, opened);
    });
    p.wrap(m, SyntaxKind::MappingCtor);
}

fn mapping_field(p: &mut Parser) {
    let m = p.marker();
    let kind = match p.current() {
        SyntaxKind::Ellipsis => {
            p.enter(Ctx::SpreadField, |p| {
                p.eat_as(Ctx::Ellipsis);
                expression(p);
            });
            SyntaxKind::SpreadField
        }
        SyntaxKind::OpenBracket => {
            p.enter(Ctx::ComputedField, |p| {
                p.eat_as(Ctx::OpenBracket);
                expression(p);
                p.expect_closing(Ctx::CloseBracket, true);
                p.expect(Ctx::Colon);
                expression(p);
            });
            SyntaxKind::ComputedField
        }
        _ => {
            p.enter(Ctx::SpecificField, |p| {
                p.expect(Ctx::FieldKey);
                if p.at(SyntaxKind::Colon) {
                    p.enter(Ctx::FieldValue, |p| {
                        p.eat_as(Ctx::Colon);
                        expression(p);
                    });
                }
            });
            SyntaxKind::SpecificField
        }
    };
    p.wrap(m, kind);
}

/// Parses a template: ``string `Hello ${name}!` ``.
fn template(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::TemplateExpr, |p| {
        if p.at_set(syntax_set!(StringKw, XmlKw)) {
            p.eat_as(Ctx::TemplateKw);
        }
        let opened = p.expect(Ctx::TemplateStart);
        let items = p.marker();
        loop {
            match p.current() {
                SyntaxKind::TemplateString => p.eat_as(Ctx::TemplateText),
                SyntaxKind::InterpolationStart => interpolation(p),
                _ => break,
            }
        }
        p.wrap(items, SyntaxKind::List);
        p.expect_closing(Ctx::TemplateEnd, opened);
    });
    p.wrap(m, SyntaxKind::TemplateExpr);
}

fn interpolation(p: &mut Parser) {
    let m = p.marker();
    p.enter(Ctx::Interpolation, |p| {
        p.eat_as(Ctx::InterpolationStart);
        expression(p);
        p.expect_closing(Ctx::InterpolationEnd, true);
    });
    p.wrap(m, SyntaxKind::Interpolation);
}

/// Parses a type descriptor.
fn type_desc(p: &mut Parser) {
    type_prec(p, 0);
}

/// Parses a type descriptor whose unions and intersections bind at least as
/// tight as the given precedence.
fn type_prec(p: &mut Parser, min_prec: usize) {
    if !p.at_or_recover(Ctx::TypeDesc) {
        return;
    }

    p.enter(Ctx::TypeDesc, |p| {
        let m = p.marker();
        type_primary(p);
        loop {
            match p.current() {
                SyntaxKind::OpenBracket => {
                    p.enter(Ctx::ArraySuffix, |p| {
                        p.eat_as(Ctx::OpenBracket);
                        if p.at_first(Ctx::ArrayLengthValue) {
                            p.eat_as(Ctx::ArrayLengthValue);
                        }
                        p.expect_closing(Ctx::CloseBracket, true);
                    });
                    p.wrap(m, SyntaxKind::ArrayTypeDesc);
                }
                SyntaxKind::QuestionMark => {
                    p.eat_as(Ctx::OptionalSuffix);
                    p.wrap(m, SyntaxKind::OptionalTypeDesc);
                }
                SyntaxKind::Pipe if min_prec <= 1 => {
                    p.enter(Ctx::UnionRhs, |p| {
                        p.eat_as(Ctx::Pipe);
                        type_prec(p, 2);
                    });
                    p.wrap(m, SyntaxKind::UnionTypeDesc);
                }
                SyntaxKind::BitAnd if min_prec <= 2 => {
                    p.enter(Ctx::IntersectionRhs, |p| {
                        p.eat_as(Ctx::BitAnd);
                        type_prec(p, 3);
                    });
                    p.wrap(m, SyntaxKind::IntersectionTypeDesc);
                }
                _ => break,
            }
        }
    });
}

fn type_primary(p: &mut Parser) {
    let m = p.marker();
    let kind = match p.current() {
        SyntaxKind::Ident => return name_ref(p),
        kind if set::OBJECT_QUAL.contains(kind) && object_ahead(p) => {
            object_type(p);
            SyntaxKind::ObjectTypeDesc
        }
        SyntaxKind::ObjectKw => {
            object_type(p);
            SyntaxKind::ObjectTypeDesc
        }
        kind if set::BUILTIN_TYPE.contains(kind) => {
            p.eat_as(Ctx::BuiltinType);
            SyntaxKind::BuiltinType
        }
        SyntaxKind::OpenParen => {
            let mut kind = SyntaxKind::NilTypeDesc;
            p.enter(Ctx::ParenType, |p| {
                p.eat_as(Ctx::OpenParen);
                if !p.at(SyntaxKind::CloseParen) {
                    kind = SyntaxKind::ParenTypeDesc;
                    type_desc(p);
                }
                p.expect_closing(Ctx::CloseParen, true);
            });
            kind
        }
        SyntaxKind::OpenBracket => {
            tuple_type(p);
            SyntaxKind::TupleTypeDesc
        }
        SyntaxKind::RecordKw => {
            record_type(p);
            SyntaxKind::RecordTypeDesc
        }
        SyntaxKind::MapKw => {
            p.enter(Ctx::MapType, |p| {
                p.eat_as(Ctx::MapKw);
                type_params(p);
            });
            SyntaxKind::ParameterizedTypeDesc
        }
        kind if set::PARAMETERIZED_TYPE.contains(kind) => {
            p.enter(Ctx::OtherParamType, |p| {
                p.eat_as(Ctx::ParamTypeKw);
                if p.at(SyntaxKind::Lt) {
                    type_params(p);
                }
            });
            SyntaxKind::ParameterizedTypeDesc
        }
        SyntaxKind::ErrorKw => {
            p.enter(Ctx::ErrorType, |p| {
                p.eat_as(Ctx::ErrorKw);
                if p.at(SyntaxKind::Lt) {
                    type_params(p);
                }
            });
            SyntaxKind::ErrorTypeDesc
        }
        SyntaxKind::FunctionKw => {
            p.enter(Ctx::FunctionType, |p| {
                p.eat_as(Ctx::FunctionKw);
                if p.at(SyntaxKind::OpenParen) {
                    signature(p);
                }
            });
            SyntaxKind::FunctionTypeDesc
        }
        SyntaxKind::DistinctKw => {
            p.enter(Ctx::DistinctType, |p| {
                p.eat_as(Ctx::DistinctKw);
                type_prec(p, 3);
            });
            SyntaxKind::DistinctTypeDesc
        }
        _ => {
            p.locate(Ctx::TypeDescPrimary);
            p.missing_whole(Ctx::TypeDesc);
            return;
        }
    };
    p.wrap(m, kind);
}

/// Whether object qualifiers at hand are followed by `object`.
fn object_ahead(p: &mut Parser) -> bool {
    let mut n = 0;
    while set::OBJECT_QUAL.contains(p.peek(n)) {
        n += 1;
    }
    p.peek(n) == SyntaxKind::ObjectKw
}

/// Parses type parameters: `<int>` or `<int, error>`.
fn type_params(p: &mut Parser) {
    p.enter(Ctx::TypeParams, |p| {
        let opened = p.expect(Ctx::AngleOpen);
        type_desc(p);
        if p.at(SyntaxKind::Comma) {
            p.enter(Ctx::TypeParamExtra, |p| {
                p.eat_as(Ctx::Comma);
                type_desc(p);
            });
        }
        p.expect_closing(Ctx::AngleClose, opened);
    });
}

/// Parses a tuple type: `[int, string...]`.
fn tuple_type(p: &mut Parser) {
    p.enter(Ctx::TupleType, |p| {
        p.eat_as(Ctx::OpenBracket);
        let members = p.marker();
        separated(p, Ctx::TupleMembers, syntax_set!(CloseBracket), |p| {
            let m = p.marker();
            type_desc(p);
            if p.at(SyntaxKind::Ellipsis) {
                p.eat_as(Ctx::Ellipsis);
                p.wrap(m, SyntaxKind::RestTypeDesc);
            }
        });
        p.wrap(members, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBracket, true);
    });
}

/// Parses a record type: `record {| int a; string b?; |}`.
fn record_type(p: &mut Parser) {
    p.enter(Ctx::RecordType, |p| {
        p.eat_as(Ctx::RecordKw);
        let body = match p.recover(Ctx::RecordBody) {
            None if p.at(SyntaxKind::OpenBracePipe) => Ctx::ClosedRecordBody,
            Some(Fix::Insert { alt: Some(alt), .. }) => alt,
            _ => Ctx::OpenRecordBody,
        };
        let (open, close) = if body == Ctx::ClosedRecordBody {
            (Ctx::OpenBracePipe, Ctx::CloseBracePipe)
        } else {
            (Ctx::OpenBrace, Ctx::CloseBrace)
        };

        p.enter(body, |p| {
            let opened = p.expect(open);
            let fields = p.marker();
            list(p, Ctx::RecordFields, syntax_set!(CloseBrace, CloseBracePipe), record_member);
            p.wrap(fields, SyntaxKind::List);
            p.expect_closing(close, opened);
        });
    });
}

fn record_member(p: &mut Parser) {
    let m = p.marker();
    metadata(p);
    if p.at(SyntaxKind::Asterisk) {
        type_inclusion(p);
        p.wrap(m, SyntaxKind::TypeInclusion);
        return;
    }

    let mut kind = SyntaxKind::RecordField;
    p.enter(Ctx::RecordFieldDesc, |p| {
        type_desc(p);
        if p.at(SyntaxKind::Ellipsis) {
            kind = SyntaxKind::RecordRestDesc;
            p.enter(Ctx::RecordRest, |p| {
                p.eat_as(Ctx::Ellipsis);
                p.expect(Ctx::Semicolon);
            });
            return;
        }

        p.enter(Ctx::NamedRecordField, |p| {
            p.expect(Ctx::FieldName);
            match p.current() {
                SyntaxKind::QuestionMark => p.enter(Ctx::OptionalFieldEnd, |p| {
                    p.eat_as(Ctx::QuestionMark);
                    p.expect(Ctx::Semicolon);
                }),
                SyntaxKind::Assign => {
                    kind = SyntaxKind::RecordFieldWithDefault;
                    default_field_end(p);
                }
                _ => {
                    p.expect(Ctx::Semicolon);
                }
            }
        });
    });
    p.wrap(m, kind);
}

fn default_field_end(p: &mut Parser) {
    p.enter(Ctx::DefaultFieldEnd, |p| {
        p.eat_as(Ctx::AssignOp);
        expression(p);
        p.expect(Ctx::Semicolon);
    });
}

/// Parses a type inclusion: `*Person;`.
fn type_inclusion(p: &mut Parser) {
    p.enter(Ctx::TypeInclusion, |p| {
        p.eat_as(Ctx::Asterisk);
        type_desc(p);
        p.expect(Ctx::Semicolon);
    });
}

/// Parses an object type: `client object { ... }`.
fn object_type(p: &mut Parser) {
    p.enter(Ctx::ObjectType, |p| {
        while p.at_set(set::OBJECT_QUAL) {
            p.eat_as(Ctx::ObjectQual);
        }
        p.expect(Ctx::ObjectKw);
        let opened = p.expect(Ctx::OpenBrace);
        let members = p.marker();
        list(p, Ctx::ObjectMembers, syntax_set!(CloseBrace), object_member);
        p.wrap(members, SyntaxKind::List);
        p.expect_closing(Ctx::CloseBrace, opened);
    });
}

fn object_member(p: &mut Parser) {
    let m = p.marker();
    metadata(p);
    if p.at(SyntaxKind::Asterisk) {
        type_inclusion(p);
        p.wrap(m, SyntaxKind::TypeInclusion);
        return;
    }

    let mut kind = SyntaxKind::ObjectField;
    if method_ahead(p) {
        kind = SyntaxKind::MethodDeclaration;
        p.enter(Ctx::ObjectMethod, |p| {
            visibility(p);
            while p.at_set(set::METHOD_QUAL) {
                p.eat_as(Ctx::MethodQual);
            }
            p.expect(Ctx::FunctionKw);
            p.expect(Ctx::MethodName);
            signature(p);
            if p.at(SyntaxKind::Semicolon) {
                p.eat_as(Ctx::Semicolon);
            } else {
                kind = SyntaxKind::MethodDefinition;
                func_body(p);
            }
        });
    } else {
        p.enter(Ctx::ObjectField, |p| {
            visibility(p);
            type_desc(p);
            p.expect(Ctx::FieldName);
            if p.at(SyntaxKind::Assign) {
                default_field_end(p);
            } else {
                p.expect(Ctx::Semicolon);
            }
        });
    }
    p.wrap(m, kind);
}

fn visibility(p: &mut Parser) {
    if p.at_set(set::VISIBILITY) {
        p.eat_as(Ctx::Visibility);
    }
}

/// Whether an object member is a method: qualifiers followed by `function`
/// and a name.
fn method_ahead(p: &mut Parser) -> bool {
    let mut n = usize::from(set::VISIBILITY.contains(p.peek(0)));
    while set::METHOD_QUAL.contains(p.peek(n)) {
        n += 1;
    }
    p.peek(n) == SyntaxKind::FunctionKw && p.peek(n + 1) == SyntaxKind::Ident
}

/// Parses the items of the repetition `many` until a token out of `stop`.
/// Tokens that cannot start an item are handed to error recovery.
fn list(p: &mut Parser, many: Ctx, stop: SyntaxSet, mut item: impl FnMut(&mut Parser)) {
    let Rule::Many(each) = many.rule() else { return };
    loop {
        let kind = p.current();
        if kind == SyntaxKind::Eof || stop.contains(kind) {
            break;
        }

        if each.first().contains(kind) {
            let cursor = p.cursor();
            item(p);
            // Make sure that the loop advances.
            if p.cursor() == cursor {
                p.remove();
            }
        } else if p.solve(many).fix == Fix::Remove {
            p.remove();
        } else {
            break;
        }
    }
}

/// Like [`list`], but items are separated by commas.
fn separated(
    p: &mut Parser,
    many: Ctx,
    stop: SyntaxSet,
    mut item: impl FnMut(&mut Parser),
) {
    let mut after_item = false;
    list(p, many, stop, |p| {
        if p.at(SyntaxKind::Comma) {
            if after_item {
                p.eat_as(Ctx::Comma);
            } else {
                p.remove();
            }
            after_item = false;
        } else {
            if after_item {
                p.expect(Ctx::Comma);
            }
            item(p);
            after_item = true;
        }
    });
}

/// An index into the parser's nodes, used as a start point for wrapping.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Marker(usize);

/// A token in the lookahead buffer.
struct Lexed {
    /// The token with its trivia.
    node: SyntaxNode,
    /// The lexer state right before the token.
    before: LexState,
}

/// An open grammar context.
#[derive(Debug, Copy, Clone)]
struct Frame {
    /// The context, always a sequence.
    ctx: Ctx,
    /// The index of the first item of the sequence not yet matched.
    pos: usize,
}

/// Finds the item of the frame's sequence that covers `ctx`. Returns its
/// index and whether it repeats.
fn find(frame: &Frame, ctx: Ctx) -> Option<(usize, bool)> {
    let Rule::Seq(items) = frame.ctx.rule() else { return None };
    items
        .iter()
        .enumerate()
        .skip(frame.pos)
        .find_map(|(i, item)| item.covers(ctx).map(|repeat| (i, repeat)))
}

/// Builds the syntax tree.
struct Parser<'s> {
    /// The underlying lexer.
    lexer: Lexer<'s>,
    /// Tokens that have been lexed but not consumed yet.
    ahead: VecDeque<Lexed>,
    /// The nodes built so far.
    nodes: Vec<SyntaxNode>,
    /// The stack of open grammar contexts.
    frames: Vec<Frame>,
    /// Skipped text waiting to become leading trivia of the next token.
    pending: EcoVec<Minutia>,
    /// The parser's limits.
    config: ParseConfig,
    /// Nodes from a previous parse that may be taken over.
    reuse: Option<Reuse>,
    /// Whether a declaration other than an import has been parsed.
    seen_decl: bool,
}

impl<'s> Parser<'s> {
    fn new(text: &'s str, config: ParseConfig, reuse: Option<Reuse>) -> Self {
        // The root context must always fit, and recovery needs one token.
        let config = ParseConfig {
            lookahead_limit: config.lookahead_limit.max(1),
            max_depth: config.max_depth.max(1),
        };
        Self {
            lexer: Lexer::new(text),
            ahead: VecDeque::new(),
            nodes: vec![],
            frames: vec![],
            pending: EcoVec::new(),
            config,
            reuse,
            seen_decl: false,
        }
    }

    fn finish_into(self, kind: SyntaxKind) -> SyntaxNode {
        SyntaxNode::inner(kind, self.nodes)
    }

    /// Make sure that at least `n + 1` tokens are lexed.
    fn fill(&mut self, n: usize) {
        while self.ahead.len() <= n {
            let before = self.lexer.state();
            let node = self.lexer.next();
            self.ahead.push_back(Lexed { node, before });
        }
    }

    /// The kind of the `n`-th upcoming token.
    fn peek(&mut self, n: usize) -> SyntaxKind {
        self.fill(n);
        self.ahead.get(n).map_or(SyntaxKind::Eof, |lexed| lexed.node.kind())
    }

    fn current(&mut self) -> SyntaxKind {
        self.peek(0)
    }

    fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_set(&mut self, set: SyntaxSet) -> bool {
        set.contains(self.current())
    }

    /// Whether the current token can start the context.
    fn at_first(&mut self, ctx: Ctx) -> bool {
        ctx.first().contains(self.current())
    }

    /// Whether there is no trivia between the `n`-th and the next token.
    fn adjacent(&mut self, n: usize) -> bool {
        self.fill(n + 1);
        match (self.ahead.get(n), self.ahead.get(n + 1)) {
            (Some(a), Some(b)) => a.node.trailing().is_empty() && b.node.leading().is_empty(),
            _ => false,
        }
    }

    /// The offset at which the current token's leading trivia starts.
    fn cursor(&mut self) -> usize {
        self.fill(0);
        self.ahead.front().map_or(self.lexer.cursor(), |lexed| lexed.before.cursor())
    }

    fn marker(&self) -> Marker {
        Marker(self.nodes.len())
    }

    /// Wrap the nodes from a marker up to now in a new inner node.
    fn wrap(&mut self, from: Marker, kind: SyntaxKind) {
        let from = from.0.min(self.nodes.len());
        let children = self.nodes.drain(from..).collect();
        self.nodes.push(SyntaxNode::inner(kind, children));
    }

    /// Attach a diagnostic to the last node.
    fn annotate_last(&mut self, diag: SyntaxDiagnostic) {
        if let Some(last) = self.nodes.last_mut() {
            *last = last.with_diagnostic(diag);
        }
    }

    /// Consume the current token, with any skipped text in front of it.
    fn eat(&mut self) {
        self.fill(0);
        let Some(Lexed { node, .. }) = self.ahead.pop_front() else { return };
        let node = if self.pending.is_empty() {
            node
        } else {
            let mut leading = std::mem::take(&mut self.pending);
            leading.extend(node.leading().iter().cloned());
            node.with_leading(leading)
        };
        self.nodes.push(node);
    }

    /// Consume the current token as the given context.
    fn eat_as(&mut self, ctx: Ctx) {
        self.locate(ctx);
        self.eat();
    }

    /// Consume the current token if it fits the token context, and recover
    /// otherwise. Returns whether a real token was consumed.
    fn expect(&mut self, ctx: Ctx) -> bool {
        match self.recover(ctx) {
            None => {
                self.eat_as(ctx);
                true
            }
            Some(_) => {
                self.locate(ctx);
                self.missing(ctx);
                false
            }
        }
    }

    /// Like [`expect`](Self::expect), but for a closing delimiter. When the
    /// opening one was missing too, the closing one is synthesized quietly.
    fn expect_closing(&mut self, ctx: Ctx, opened: bool) {
        if opened {
            self.expect(ctx);
        } else if self.at_first(ctx) {
            self.eat_as(ctx);
        } else {
            self.locate(ctx);
            let kind = ctx.insert_kind().unwrap_or(SyntaxKind::Ident);
            self.nodes.push(SyntaxNode::missing(kind));
        }
    }

    /// Whether the current token can start the context. If it can't, either
    /// recovery skips ahead to where it can or a missing node is inserted.
    fn at_or_recover(&mut self, ctx: Ctx) -> bool {
        if self.recover(ctx).is_none() {
            return true;
        }
        self.locate(ctx);
        self.missing_whole(ctx);
        false
    }

    /// Skip tokens until the current one fits the context or recovery
    /// decides to insert something. Returns the insertion.
    fn recover(&mut self, ctx: Ctx) -> Option<Fix> {
        loop {
            if self.at_first(ctx) {
                return None;
            }
            match self.solve(ctx).fix {
                Fix::Remove => self.remove(),
                fix => return Some(fix),
            }
        }
    }

    /// Push a missing token for a token context.
    fn missing(&mut self, ctx: Ctx) {
        let kind = ctx.insert_kind().unwrap_or(SyntaxKind::Ident);
        let diag = SyntaxDiagnostic::error(ctx.missing_code());
        self.nodes.push(SyntaxNode::missing(kind).with_diagnostic(diag));
    }

    /// Push a missing name standing in for a whole expression or type.
    fn missing_whole(&mut self, ctx: Ctx) {
        let diag = SyntaxDiagnostic::error(ctx.missing_code());
        let name = SyntaxNode::missing(SyntaxKind::Ident).with_diagnostic(diag);
        self.nodes.push(SyntaxNode::inner(SyntaxKind::SimpleNameRef, vec![name]));
    }

    /// Skip the current token, reporting it.
    fn remove(&mut self) {
        if self.at(SyntaxKind::Eof) {
            return;
        }
        if let Some(lexed) = self.ahead.pop_front() {
            tracing::trace!(kind = ?lexed.node.kind(), "removing token");
            self.pending.push(lexed.node.into_invalid());
        }
    }

    /// Skip the current token without a diagnostic.
    fn skip_silently(&mut self) {
        if let Some(lexed) = self.ahead.pop_front() {
            self.pending.push(Minutia::Invalid(lexed.node));
        }
    }

    /// Open a grammar context for the duration of `f`.
    fn enter(&mut self, ctx: Ctx, f: impl FnOnce(&mut Self)) {
        self.locate(ctx);
        if self.frames.len() >= self.config.max_depth {
            self.too_deep();
            return;
        }

        self.frames.push(Frame { ctx, pos: 0 });
        stacker::maybe_grow(32 * 1024, 2 * 1024 * 1024, || f(self));
        self.frames.pop();
    }

    /// Report the nesting limit once and skip the balanced run of tokens
    /// that would have nested deeper.
    fn too_deep(&mut self) {
        tracing::debug!(depth = self.frames.len(), "nesting too deep");
        let diag = SyntaxDiagnostic::error(DiagnosticCode::NestingTooDeep);
        let name = SyntaxNode::missing(SyntaxKind::Ident).with_diagnostic(diag);
        self.nodes.push(SyntaxNode::inner(SyntaxKind::SimpleNameRef, vec![name]));

        let mut depth = 0usize;
        loop {
            match self.current() {
                SyntaxKind::Eof => break,
                SyntaxKind::OpenParen
                | SyntaxKind::OpenBracket
                | SyntaxKind::OpenBrace
                | SyntaxKind::OpenBracePipe
                | SyntaxKind::InterpolationStart => depth += 1,
                SyntaxKind::CloseParen
                | SyntaxKind::CloseBracket
                | SyntaxKind::CloseBrace
                | SyntaxKind::CloseBracePipe
                | SyntaxKind::Semicolon
                    if depth == 0 =>
                {
                    break;
                }
                SyntaxKind::CloseParen
                | SyntaxKind::CloseBracket
                | SyntaxKind::CloseBrace
                | SyntaxKind::CloseBracePipe => depth -= 1,
                _ => {}
            }
            self.skip_silently();
        }
    }

    /// Advance the innermost frame to the item that covers `ctx`.
    ///
    /// Panics if the frame has no such item left, as that is a gap in the
    /// grammar table.
    fn locate(&mut self, ctx: Ctx) {
        let Some(frame) = self.frames.last_mut() else { return };
        match find(frame, ctx) {
            Some((index, repeat)) => frame.pos = if repeat { index } else { index + 1 },
            None => panic!("{ctx:?} cannot follow position {} of {:?}", frame.pos, frame.ctx),
        }
    }

    /// Everything the open frames still expect after `ctx`, innermost first.
    fn continuation_after(&self, ctx: Ctx) -> Continuation {
        let mut cont = None;
        for (i, frame) in self.frames.iter().enumerate() {
            let Rule::Seq(items) = frame.ctx.rule() else { continue };
            let mut from = frame.pos;
            if i + 1 == self.frames.len()
                && let Some((index, repeat)) = find(frame, ctx)
            {
                from = if repeat { index } else { index + 1 };
            }
            cont = prepend(items.get(from..).unwrap_or(&[]), &cont);
        }
        cont
    }

    /// The kinds of the tokens recovery may look at.
    fn lookahead(&mut self) -> Vec<SyntaxKind> {
        let n = self.config.lookahead_limit + 1;
        self.fill(n);
        self.ahead.iter().take(n).map(|lexed| lexed.node.kind()).collect()
    }

    /// Ask error recovery how to continue when the current token does not
    /// fit `ctx`.
    fn solve(&mut self, ctx: Ctx) -> Solution {
        let tokens = self.lookahead();
        let cont = self.continuation_after(ctx);
        Recovery::new(&tokens, self.config.lookahead_limit).solve(ctx, &cont)
    }

    /// Ask error recovery which alternative of `ctx` fits best.
    fn predict(&mut self, ctx: Ctx) -> Ctx {
        let tokens = self.lookahead();
        let cont = self.continuation_after(ctx);
        Recovery::new(&tokens, self.config.lookahead_limit).predict(ctx, &cont)
    }

    /// Lex the upcoming tokens again after changing the lexer's modes.
    fn relex(&mut self, f: impl FnOnce(&mut Lexer<'s>)) {
        if let Some(front) = self.ahead.front() {
            self.lexer.restore(front.before.clone());
        }
        self.ahead.clear();
        f(&mut self.lexer);
    }

    /// Parse within a given lexer mode.
    fn enter_mode(&mut self, mode: LexMode, func: impl FnOnce(&mut Self)) {
        self.relex(|lexer| lexer.push_mode(mode));
        func(self);
        self.relex(|lexer| {
            if lexer.mode() == mode {
                lexer.pop_mode();
            }
        });
    }

    /// Take over a node of the previous parse if one of the given kinds
    /// starts right here.
    fn reuse(&mut self, ctx: Ctx, kinds: SyntaxSet) -> bool {
        if self.reuse.is_none() || !self.pending.is_empty() {
            return false;
        }

        self.fill(0);
        let Some(before) = self.ahead.front().map(|lexed| lexed.before.clone()) else {
            return false;
        };
        if !matches!(before.modes(), [LexMode::Default]) {
            return false;
        }

        let offset = before.cursor();
        let Some(node) = self.reuse.as_mut().and_then(|reuse| reuse.take(offset, kinds))
        else {
            return false;
        };

        tracing::trace!(kind = ?node.kind(), offset, "reusing node");
        self.locate(ctx);
        self.lexer.restore(before);
        self.lexer.skip(node.width());
        self.ahead.clear();
        if ctx == Ctx::ModuleMember {
            self.seen_decl = true;
        }
        self.nodes.push(node);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn messages(node: &SyntaxNode) -> Vec<std::string::String> {
        node.diagnostics()
            .into_iter()
            .map(|(_, diag)| diag.message().to_string())
            .collect()
    }

    #[track_caller]
    fn member(root: &SyntaxNode, index: usize) -> SyntaxNode {
        root.child(1).and_then(|members| members.child(index)).unwrap().clone()
    }

    #[test]
    fn test_missing_return_type_and_body() {
        let root = parse("function f() returns");
        assert_eq!(messages(&root), ["missing type descriptor", "missing open brace"]);
        assert_eq!(member(&root, 0).kind(), SyntaxKind::FunctionDefinition);
    }

    #[test]
    fn test_missing_initializer() {
        let root = parse("int x = ;");
        assert_eq!(messages(&root), ["missing expression"]);
        assert_eq!(member(&root, 0).kind(), SyntaxKind::ModuleVarDecl);
    }

    #[test]
    fn test_if_statement_is_clean() {
        let stmt = parse_statement("if x { }");
        assert!(messages(&stmt).is_empty());
        assert_eq!(stmt.child(0).unwrap().kind(), SyntaxKind::IfElse);

        let root = parse("function f() {\n    if x { } else if y { } else { }\n}\n");
        assert!(messages(&root).is_empty());
    }

    #[test]
    fn test_unterminated_string_resumes_on_next_line() {
        let text = "string s = \"abc;\nint y = 1;\n";
        let root = parse(text);
        assert_eq!(messages(&root), ["missing closing quote", "missing semicolon"]);
        let second = member(&root, 1);
        assert_eq!(second.kind(), SyntaxKind::ModuleVarDecl);
        assert_eq!(second.full_text(), "int y = 1;\n");
        assert_eq!(root.full_text(), text);
    }

    #[test]
    fn test_stray_token_is_removed() {
        let root = parse("int x = 1 2;");
        assert_eq!(messages(&root), ["invalid token '2'"]);
        assert_eq!(root.full_text(), "int x = 1 2;");
    }

    #[test]
    fn test_statements() {
        #[track_caller]
        fn test(text: &str, kind: SyntaxKind) {
            let node = parse_statement(text);
            assert!(messages(&node).is_empty(), "{text}: {:?}", messages(&node));
            assert_eq!(node.child(0).unwrap().kind(), kind, "{text}");
        }

        test("foo(1, b = 2);", SyntaxKind::CallStatement);
        test("io:println(\"hi\");", SyntaxKind::CallStatement);
        test("Foo x = 1;", SyntaxKind::LocalVarDecl);
        test("int[] xs = [1, 2];", SyntaxKind::LocalVarDecl);
        test("map<string> m = {a: \"b\"};", SyntaxKind::LocalVarDecl);
        test("x = 1;", SyntaxKind::Assignment);
        test("x += 1;", SyntaxKind::CompoundAssignment);
        test("x >>= 2;", SyntaxKind::CompoundAssignment);
        test("a.b().c = d[0];", SyntaxKind::Assignment);
        test("check f();", SyntaxKind::CallStatement);
        test("return;", SyntaxKind::Return);
        test("while i < 10 { i += 1; }", SyntaxKind::While);
        test("foreach var x in xs { total += x; }", SyntaxKind::Foreach);
        test("lock { count += 1; }", SyntaxKind::Lock);
        test("panic error(\"boom\");", SyntaxKind::Panic);
    }

    #[test]
    fn test_expression_statement_is_reported() {
        let node = parse_statement("x;");
        assert_eq!(messages(&node), ["expression is not allowed as a statement"]);
    }

    #[test]
    fn test_shifts_are_composed() {
        let node = parse_expression("a >> b");
        let binary = node.child(0).unwrap();
        assert_eq!(binary.kind(), SyntaxKind::BinaryExpr);
        let kinds: Vec<_> = binary.children().map(SyntaxNode::kind).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::SimpleNameRef,
                SyntaxKind::Gt,
                SyntaxKind::Gt,
                SyntaxKind::SimpleNameRef
            ]
        );

        // With a space, the second `>` cannot continue the operator.
        assert!(!messages(&parse_expression("a > > b")).is_empty());
    }

    #[test]
    fn test_precedence() {
        let node = parse_expression("1 + 2 * 3 == 7 && ok");
        let and = node.child(0).unwrap();
        assert_eq!(and.kind(), SyntaxKind::BinaryExpr);
        assert_eq!(and.child(1).unwrap().kind(), SyntaxKind::LogicalAnd);
        let eq = and.child(0).unwrap();
        assert_eq!(eq.child(1).unwrap().kind(), SyntaxKind::EqEq);
        let sum = eq.child(0).unwrap();
        assert_eq!(sum.child(1).unwrap().kind(), SyntaxKind::Plus);
        assert_eq!(sum.child(2).unwrap().kind(), SyntaxKind::BinaryExpr);
    }

    #[test]
    fn test_types() {
        #[track_caller]
        fn test(text: &str, kind: SyntaxKind) {
            let node = parse_type_desc(text);
            assert!(messages(&node).is_empty(), "{text}: {:?}", messages(&node));
            assert_eq!(node.child(0).unwrap().kind(), kind, "{text}");
        }

        test("int", SyntaxKind::BuiltinType);
        test("int|string?", SyntaxKind::UnionTypeDesc);
        test("readonly & Person", SyntaxKind::IntersectionTypeDesc);
        test("map<map<int>>", SyntaxKind::ParameterizedTypeDesc);
        test("[int, string...]", SyntaxKind::TupleTypeDesc);
        test("record {| int a; string b?; float c = 1.0; |}", SyntaxKind::RecordTypeDesc);
        test("client object { public int x; remote function f(); }", SyntaxKind::ObjectTypeDesc);
        test("function (int, string...) returns boolean", SyntaxKind::FunctionTypeDesc);
        test("distinct error<Detail>", SyntaxKind::DistinctTypeDesc);
        test("()", SyntaxKind::NilTypeDesc);
        test("int[3][]", SyntaxKind::ArrayTypeDesc);
    }

    #[test]
    fn test_declarations() {
        let text = "\
import ballerina/io version 1.2.3 as x;
import foo;

# Adds numbers.
@display {label: \"add\"}
public function add(int a, int b = 2, int... rest) returns int => a + b;

type Id int|string;
const MAX = 10;
const int MIN = 0;
enum Color { RED, GREEN = \"g\" }
listener http:Listener ep = new (8080);
function ext() = @java:Method {} external;
";
        let root = parse(text);
        assert!(messages(&root).is_empty(), "{:?}", messages(&root));
        assert_eq!(root.full_text(), text);

        let imports = root.child(0).unwrap();
        assert_eq!(imports.children().len(), 2);
        let import = imports.child(0).unwrap();
        assert!(import.cast_first(SyntaxKind::ImportOrgName).is_some());
        assert!(import.cast_first(SyntaxKind::ImportVersion).is_some());
        assert!(import.cast_first(SyntaxKind::ImportPrefix).is_some());

        let kinds: Vec<_> = root.child(1).unwrap().children().map(SyntaxNode::kind).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::FunctionDefinition,
                SyntaxKind::TypeDefinition,
                SyntaxKind::ConstantDecl,
                SyntaxKind::ConstantDecl,
                SyntaxKind::EnumDecl,
                SyntaxKind::ListenerDecl,
                SyntaxKind::FunctionDefinition,
            ]
        );
        let add = member(&root, 0);
        assert_eq!(add.child(0).unwrap().kind(), SyntaxKind::Metadata);
    }

    #[test]
    fn test_match_statement() {
        let text = "\
match v {
    0 | -1 => { }
    [1, var x, ...var rest] if x > 1 => { return; }
    {a: \"s\", b: var y, ...var others} => { }
    _ => { }
}";
        let node = parse_statement(text);
        assert!(messages(&node).is_empty(), "{:?}", messages(&node));
        assert_eq!(node.full_text(), text);

        let stmt = node.child(0).unwrap();
        assert_eq!(stmt.kind(), SyntaxKind::MatchStatement);
        let clauses = stmt.cast_first(SyntaxKind::List).unwrap();
        assert!(clauses.children().all(|clause| clause.kind() == SyntaxKind::MatchClause));

        let first = |index: usize| {
            let clause = clauses.child(index).unwrap();
            clause.child(0).and_then(|patterns| patterns.child(0)).unwrap().kind()
        };
        assert_eq!(first(0), SyntaxKind::BasicLiteral);
        assert_eq!(first(1), SyntaxKind::ListMatchPattern);
        assert_eq!(first(2), SyntaxKind::MappingMatchPattern);
        assert_eq!(first(3), SyntaxKind::SimpleNameRef);

        let alternatives = clauses.child(0).and_then(|clause| clause.child(0)).unwrap();
        assert_eq!(alternatives.children().len(), 3);
        assert_eq!(alternatives.child(2).unwrap().kind(), SyntaxKind::UnaryExpr);
        assert!(clauses.child(1).unwrap().cast_first(SyntaxKind::MatchGuard).is_some());
    }

    #[test]
    fn test_missing_match_pattern() {
        let node = parse_statement("match v { 1 | => { } }");
        assert_eq!(messages(&node), ["missing match pattern"]);
        assert_eq!(node.child(0).unwrap().kind(), SyntaxKind::MatchStatement);
    }

    #[test]
    fn test_service_declaration() {
        let text = "\
service hello on ep, new http:Listener(8080) {
    # Greets.
    resource function greet(http:Caller caller) { }
    remote function ping() returns string => \"pong\";
    string name = \"svc\";
}

service on ep { }
";
        let root = parse(text);
        assert!(messages(&root).is_empty(), "{:?}", messages(&root));
        assert_eq!(root.full_text(), text);

        let service = member(&root, 0);
        assert_eq!(service.kind(), SyntaxKind::ServiceDecl);
        let lists: Vec<_> =
            service.children().filter(|child| child.kind() == SyntaxKind::List).collect();
        assert_eq!(lists[0].children().len(), 3);
        let kinds: Vec<_> = lists[1].children().map(SyntaxNode::kind).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::MethodDefinition,
                SyntaxKind::MethodDefinition,
                SyntaxKind::ObjectField,
            ]
        );
        assert_eq!(member(&root, 1).kind(), SyntaxKind::ServiceDecl);
    }

    #[test]
    fn test_xml_navigation() {
        #[track_caller]
        fn test(text: &str, kind: SyntaxKind) {
            let node = parse_expression(text);
            assert!(messages(&node).is_empty(), "{text}: {:?}", messages(&node));
            assert_eq!(node.child(0).unwrap().kind(), kind, "{text}");
            assert_eq!(node.full_text(), text);
        }

        test("x.<a>", SyntaxKind::XmlFilterExpr);
        test("x.<a|ns:b|ns:*|*>", SyntaxKind::XmlFilterExpr);
        test("x/*", SyntaxKind::XmlStepExpr);
        test("x/<ns:item>", SyntaxKind::XmlStepExpr);
        test("x/**/<item>", SyntaxKind::XmlStepExpr);
        test("x.<a>/<b>.length()", SyntaxKind::MethodCall);
        test("a / b", SyntaxKind::BinaryExpr);
        test("x.<a> + y/*", SyntaxKind::BinaryExpr);

        let node = parse_expression("x.<a");
        assert_eq!(messages(&node), ["missing greater than"]);
    }

    #[test]
    fn test_import_after_declaration() {
        let root = parse("int x = 1;\nimport a;\n");
        assert_eq!(messages(&root), ["imports must come before other declarations"]);
    }

    #[test]
    fn test_templates() {
        let text = "string `a ${b + 1} c ${ {x: 1}[\"x\"] }`";
        let node = parse_expression(text);
        assert!(messages(&node).is_empty(), "{:?}", messages(&node));
        let template = node.child(0).unwrap();
        assert_eq!(template.kind(), SyntaxKind::TemplateExpr);
        assert_eq!(node.full_text(), text);
    }

    #[test]
    fn test_nesting_limit() {
        let text = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        let node = parse_expression(&text);
        assert_eq!(messages(&node), ["maximum nesting depth reached"]);
        assert_eq!(node.full_text(), text);
    }

    #[test]
    fn test_zero_limits_keep_text() {
        let text = "int x = 1; int y = (2);\nfunction f() { g(); }";
        for config in [
            ParseConfig { lookahead_limit: 5, max_depth: 0 },
            ParseConfig { lookahead_limit: 0, max_depth: 1 },
            ParseConfig { lookahead_limit: 0, max_depth: 0 },
        ] {
            let root = parse_with(text, config);
            assert_eq!(root.kind(), SyntaxKind::CompilationUnit);
            assert_eq!(root.full_text(), text);
        }
        let root = parse_with(text, ParseConfig { lookahead_limit: 5, max_depth: 0 });
        assert!(messages(&root).iter().any(|m| m == "maximum nesting depth reached"));
    }

    #[test]
    fn test_config_from_toml() {
        let config: ParseConfig = toml::from_str("lookahead-limit = 3").unwrap();
        assert_eq!(config, ParseConfig { lookahead_limit: 3, max_depth: 128 });
    }

    #[test]
    fn test_garbage_round_trips() {
        for text in [
            "",
            "}}}",
            "function (",
            "import ;;",
            "int x = \"\\q\" $ 0x.; function f() { if { } else",
            "record {| int |} x = `${`;",
            "@ # doc\n public public",
            "type T record { *; int... };",
            "function f() { x = = 1; y. ; z[ ; }",
        ] {
            let root = parse(text);
            assert_eq!(root.full_text(), text);
            assert_eq!(parse(text), root);
        }
    }
}
