//! The grammar-context table.
//!
//! Every context the parser can be in has a row here. The parser uses the
//! table to find out where it is when something goes wrong, and the recovery
//! engine walks it to simulate how the rest of the input would parse after a
//! fix. Keeping the grammar as data means both always agree.

use std::sync::LazyLock;

use crate::set::{self, SyntaxSet, syntax_set};
use crate::{DiagnosticCode, SyntaxKind};

/// How a context is matched.
#[derive(Debug, Copy, Clone)]
pub enum Rule {
    /// A single token out of a set. The kind is what recovery inserts.
    Token(SyntaxSet, SyntaxKind),
    /// Contexts that follow one another.
    Seq(&'static [Ctx]),
    /// Alternatives in priority order.
    Alt(&'static [Ctx]),
    /// Zero or more repetitions. Closing delimiters belong to the parent.
    Many(Ctx),
    /// Matches nothing.
    Empty,
}

/// A token context with a single kind.
macro_rules! tok {
    ($kind:ident) => {
        Rule::Token(syntax_set!($kind), SyntaxKind::$kind)
    };
}

/// A token context accepting a set of kinds, inserting the first named one.
macro_rules! toks {
    ($insert:ident: $set:expr) => {
        Rule::Token($set, SyntaxKind::$insert)
    };
}

/// Defines the [`Ctx`] enum and its table in one go, so that a context
/// without a row cannot exist.
macro_rules! grammar {
    ($($name:ident => $rule:expr;)*) => {
        /// A grammar context: where in the grammar the parser currently is.
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(u16)]
        pub enum Ctx {
            $($name,)*
        }

        impl Ctx {
            /// Every context, indexed by discriminant.
            pub const ALL: &'static [Ctx] = &[$(Ctx::$name,)*];

            /// The table row of this context.
            pub fn rule(self) -> Rule {
                use Ctx::*;
                use Rule::{Alt, Empty, Many, Seq};
                match self {
                    $($name => $rule,)*
                }
            }
        }
    };
}

grammar! {
    // Module level.
    CompUnit => Seq(&[Imports, ModuleMembers, EndOfFile]);
    Imports => Many(ImportDecl);
    ModuleMembers => Many(ModuleMember);
    ModuleMember => Alt(&[
        ImportDecl, FuncDefOrVar, TypeDef, ConstDecl, ListenerDecl, EnumDecl,
        ServiceDecl, ModuleVarDecl, Annotation, DocString, PublicQual,
    ]);
    FuncDefOrVar => Alt(&[FuncDef, ModuleVarDecl]);
    EndOfFile => tok!(Eof);
    PublicQual => tok!(PublicKw);
    DocString => tok!(DocString);
    Omitted => Empty;

    // Imports.
    ImportDecl => Seq(&[
        ImportKw, ImportOrgOpt, ImportModuleName, ImportVersionOpt, ImportPrefixOpt,
        Semicolon,
    ]);
    ImportKw => tok!(ImportKw);
    ImportOrgOpt => Alt(&[ImportOrg, Omitted]);
    ImportOrg => Seq(&[OrgName, Slash]);
    OrgName => tok!(Ident);
    Slash => tok!(Slash);
    ImportModuleName => Seq(&[ModuleNamePart, ModuleNameTail]);
    ModuleNamePart => tok!(Ident);
    ModuleNameTail => Many(ModuleNameSuffix);
    ModuleNameSuffix => Seq(&[Dot, ModuleNamePart]);
    Dot => tok!(Dot);
    ImportVersionOpt => Alt(&[ImportVersion, Omitted]);
    ImportVersion => Seq(&[VersionKw, VersionNumber, VersionTail]);
    VersionKw => tok!(VersionKw);
    VersionNumber => tok!(Int);
    VersionTail => Many(VersionSuffix);
    VersionSuffix => Seq(&[Dot, VersionNumber]);
    ImportPrefixOpt => Alt(&[ImportPrefix, Omitted]);
    ImportPrefix => Seq(&[AsKw, ImportPrefixName]);
    AsKw => tok!(AsKw);
    ImportPrefixName => tok!(Ident);
    Semicolon => tok!(Semicolon);

    // Declarations.
    TypeDef => Seq(&[TypeKw, TypeName, TypeDesc, Semicolon]);
    TypeKw => tok!(TypeKw);
    TypeName => tok!(Ident);
    ConstDecl => Seq(&[ConstKw, ConstType, ConstName, Initializer, Semicolon]);
    ConstKw => tok!(ConstKw);
    ConstType => Alt(&[TypeDesc, Omitted]);
    ConstName => tok!(Ident);
    ListenerDecl => Seq(&[ListenerKw, ConstType, ConstName, Initializer, Semicolon]);
    ListenerKw => tok!(ListenerKw);
    EnumDecl => Seq(&[EnumKw, EnumName, OpenBrace, EnumMembers, CloseBrace]);
    EnumKw => tok!(EnumKw);
    EnumName => tok!(Ident);
    EnumMembers => Many(EnumItem);
    EnumItem => Alt(&[EnumMember, Comma]);
    EnumMember => Seq(&[EnumMemberName, EnumValue]);
    EnumMemberName => tok!(Ident);
    EnumValue => Alt(&[Initializer, Omitted]);
    ModuleVarDecl => Seq(&[FinalOpt, VarType, VarName, VarInit, Semicolon]);
    LocalVarDecl => Seq(&[FinalOpt, VarType, VarName, VarInit, Semicolon]);
    FinalOpt => Alt(&[FinalKw, Omitted]);
    FinalKw => tok!(FinalKw);
    VarType => Alt(&[VarKw, TypeDesc]);
    VarKw => tok!(VarKw);
    VarName => tok!(Ident);
    VarInit => Alt(&[Initializer, Omitted]);
    Initializer => Seq(&[AssignOp, Expression]);
    AssignOp => tok!(Assign);
    OpenBrace => tok!(OpenBrace);
    CloseBrace => tok!(CloseBrace);
    Comma => tok!(Comma);

    // Services.
    ServiceDecl => Seq(&[ServiceKw, ServiceNameOpt, OnKw, Listeners, ServiceBody]);
    ServiceKw => tok!(ServiceKw);
    ServiceNameOpt => Alt(&[ServiceName, Omitted]);
    ServiceName => tok!(Ident);
    OnKw => tok!(OnKw);
    Listeners => Seq(&[Expression, ListenerTail]);
    ListenerTail => Many(ListenerMore);
    ListenerMore => Seq(&[Comma, Expression]);
    ServiceBody => Seq(&[OpenBrace, ObjectMembers, CloseBrace]);

    // Functions.
    FuncDef => Seq(&[FunctionKw, FuncName, FuncSignature, FuncBody]);
    FunctionKw => tok!(FunctionKw);
    FuncName => tok!(Ident);
    FuncSignature => Seq(&[OpenParen, Params, CloseParen, ReturnsOpt]);
    OpenParen => tok!(OpenParen);
    CloseParen => tok!(CloseParen);
    Params => Many(ParamItem);
    ParamItem => Alt(&[Param, Comma]);
    Param => Seq(&[ParamAnnots, TypeDesc, ParamRhs]);
    ParamAnnots => Many(Annotation);
    ParamRhs => Alt(&[NamedParam, RestParam, Omitted]);
    NamedParam => Seq(&[ParamName, ParamDefaultOpt]);
    ParamName => tok!(Ident);
    ParamDefaultOpt => Alt(&[ParamDefault, Omitted]);
    ParamDefault => Seq(&[AssignOp, Expression]);
    RestParam => Seq(&[Ellipsis, RestParamName]);
    RestParamName => Alt(&[ParamName, Omitted]);
    Ellipsis => tok!(Ellipsis);
    ReturnsOpt => Alt(&[Returns, Omitted]);
    Returns => Seq(&[ReturnsKw, ReturnAnnots, TypeDesc]);
    ReturnsKw => tok!(ReturnsKw);
    ReturnAnnots => Many(Annotation);
    FuncBody => Alt(&[FuncBodyBlock, ExternalBody, ExprBody]);
    FuncBodyBlock => Seq(&[OpenBrace, Stmts, CloseBrace]);
    ExternalBody => Seq(&[AssignOp, ExternalAnnots, ExternalKw, Semicolon]);
    ExternalAnnots => Many(Annotation);
    ExternalKw => tok!(ExternalKw);
    ExprBody => Seq(&[RightDoubleArrow, Expression, Semicolon]);
    RightDoubleArrow => tok!(RightDoubleArrow);

    // Metadata.
    Annotation => Seq(&[At, NameRef, AnnotValue]);
    At => tok!(At);
    AnnotValue => Alt(&[MappingCtor, Omitted]);

    // Type descriptors.
    TypeDesc => Seq(&[TypeDescPrimary, TypeDescTail]);
    TypeDescTail => Many(TypeSuffix);
    TypeSuffix => Alt(&[ArraySuffix, OptionalSuffix, UnionRhs, IntersectionRhs]);
    ArraySuffix => Seq(&[OpenBracket, ArrayLength, CloseBracket]);
    ArrayLength => Alt(&[ArrayLengthValue, Omitted]);
    ArrayLengthValue => toks!(Int: syntax_set!(Int, HexInt, Asterisk, Ident));
    OpenBracket => tok!(OpenBracket);
    CloseBracket => tok!(CloseBracket);
    OptionalSuffix => tok!(QuestionMark);
    UnionRhs => Seq(&[Pipe, TypeDesc]);
    Pipe => tok!(Pipe);
    IntersectionRhs => Seq(&[BitAnd, TypeDesc]);
    BitAnd => tok!(BitAnd);
    TypeDescPrimary => Alt(&[
        ObjectType, RecordType, BuiltinType, NameRef, ParenType, TupleType, MapType,
        OtherParamType, ErrorType, FunctionType, DistinctType,
    ]);
    BuiltinType => toks!(IntKw: set::BUILTIN_TYPE);
    NameRef => Seq(&[Identifier, Qualifier]);
    Identifier => tok!(Ident);
    Qualifier => Alt(&[QualifiedSuffix, Omitted]);
    QualifiedSuffix => Seq(&[Colon, Identifier]);
    Colon => tok!(Colon);
    ParenType => Seq(&[OpenParen, ParenTypeInner, CloseParen]);
    ParenTypeInner => Alt(&[TypeDesc, Omitted]);
    TupleType => Seq(&[OpenBracket, TupleMembers, CloseBracket]);
    TupleMembers => Many(TupleMember);
    TupleMember => Alt(&[TypeDesc, Ellipsis, Comma]);
    RecordType => Seq(&[RecordKw, RecordBody]);
    RecordKw => tok!(RecordKw);
    RecordBody => Alt(&[ClosedRecordBody, OpenRecordBody]);
    ClosedRecordBody => Seq(&[OpenBracePipe, RecordFields, CloseBracePipe]);
    OpenRecordBody => Seq(&[OpenBrace, RecordFields, CloseBrace]);
    OpenBracePipe => tok!(OpenBracePipe);
    CloseBracePipe => tok!(CloseBracePipe);
    RecordFields => Many(RecordMember);
    RecordMember => Alt(&[TypeInclusion, RecordFieldDesc, Annotation, DocString]);
    TypeInclusion => Seq(&[Asterisk, TypeDesc, Semicolon]);
    Asterisk => tok!(Asterisk);
    RecordFieldDesc => Seq(&[TypeDesc, RecordFieldRhs]);
    RecordFieldRhs => Alt(&[NamedRecordField, RecordRest]);
    NamedRecordField => Seq(&[FieldName, FieldEnd]);
    FieldName => tok!(Ident);
    RecordRest => Seq(&[Ellipsis, Semicolon]);
    FieldEnd => Alt(&[Semicolon, OptionalFieldEnd, DefaultFieldEnd]);
    OptionalFieldEnd => Seq(&[QuestionMark, Semicolon]);
    QuestionMark => tok!(QuestionMark);
    DefaultFieldEnd => Seq(&[AssignOp, Expression, Semicolon]);
    ObjectType => Seq(&[ObjectQuals, ObjectKw, OpenBrace, ObjectMembers, CloseBrace]);
    ObjectQuals => Many(ObjectQual);
    ObjectQual => toks!(ClientKw: set::OBJECT_QUAL);
    ObjectKw => tok!(ObjectKw);
    ObjectMembers => Many(ObjectMember);
    ObjectMember => Alt(&[TypeInclusion, ObjectMethod, ObjectField, Annotation, DocString]);
    ObjectField => Seq(&[VisibilityOpt, TypeDesc, FieldName, ObjectFieldEnd]);
    VisibilityOpt => Alt(&[Visibility, Omitted]);
    Visibility => toks!(PublicKw: set::VISIBILITY);
    ObjectFieldEnd => Alt(&[Semicolon, DefaultFieldEnd]);
    ObjectMethod => Seq(&[
        VisibilityOpt, MethodQuals, FunctionKw, MethodName, FuncSignature, MethodBody,
    ]);
    MethodQuals => Many(MethodQual);
    MethodQual => toks!(RemoteKw: set::METHOD_QUAL);
    MethodName => tok!(Ident);
    MethodBody => Alt(&[Semicolon, FuncBody]);
    MapType => Seq(&[MapKw, TypeParams]);
    MapKw => tok!(MapKw);
    TypeParams => Seq(&[AngleOpen, TypeDesc, TypeParamMore, AngleClose]);
    TypeParamMore => Alt(&[TypeParamExtra, Omitted]);
    TypeParamExtra => Seq(&[Comma, TypeDesc]);
    AngleOpen => tok!(Lt);
    AngleClose => tok!(Gt);
    OtherParamType => Seq(&[ParamTypeKw, TypeParamsOpt]);
    ParamTypeKw => toks!(FutureKw: set::PARAMETERIZED_TYPE);
    TypeParamsOpt => Alt(&[TypeParams, Omitted]);
    ErrorType => Seq(&[ErrorKw, TypeParamsOpt]);
    ErrorKw => tok!(ErrorKw);
    FunctionType => Seq(&[FunctionKw, FuncSignature]);
    DistinctType => Seq(&[DistinctKw, TypeDesc]);
    DistinctKw => tok!(DistinctKw);

    // Statements.
    Stmts => Many(Statement);
    Statement => Alt(&[
        Block, IfElse, While, Foreach, Lock, Return, Break, Continue, Panic, Fail,
        Match, VarDeclOrExprStmt,
    ]);
    VarDeclOrExprStmt => Alt(&[LocalVarDecl, ExprLedStmt]);
    Block => Seq(&[OpenBrace, Stmts, CloseBrace]);
    IfElse => Seq(&[IfKw, Expression, Block, ElseOpt]);
    IfKw => tok!(IfKw);
    ElseOpt => Alt(&[ElseClause, Omitted]);
    ElseClause => Seq(&[ElseKw, ElseBody]);
    ElseKw => tok!(ElseKw);
    ElseBody => Alt(&[IfElse, Block]);
    While => Seq(&[WhileKw, Expression, Block]);
    WhileKw => tok!(WhileKw);
    Foreach => Seq(&[ForeachKw, VarType, VarName, InKw, Expression, Block]);
    ForeachKw => tok!(ForeachKw);
    InKw => tok!(InKw);
    Lock => Seq(&[LockKw, Block]);
    LockKw => tok!(LockKw);
    Return => Seq(&[ReturnKw, ReturnValue, Semicolon]);
    ReturnKw => tok!(ReturnKw);
    ReturnValue => Alt(&[Expression, Omitted]);
    Break => Seq(&[BreakKw, Semicolon]);
    BreakKw => tok!(BreakKw);
    Continue => Seq(&[ContinueKw, Semicolon]);
    ContinueKw => tok!(ContinueKw);
    Panic => Seq(&[PanicKw, Expression, Semicolon]);
    PanicKw => tok!(PanicKw);
    Fail => Seq(&[FailKw, Expression, Semicolon]);
    FailKw => tok!(FailKw);
    Match => Seq(&[MatchKw, Expression, OpenBrace, MatchClauses, CloseBrace]);
    MatchKw => tok!(MatchKw);
    MatchClauses => Many(MatchClause);
    MatchClause => Seq(&[MatchPatterns, MatchGuardOpt, RightDoubleArrow, Block]);
    MatchPatterns => Seq(&[MatchPattern, MatchPatternTail]);
    MatchPatternTail => Many(MatchPatternMore);
    MatchPatternMore => Seq(&[Pipe, MatchPattern]);
    MatchGuardOpt => Alt(&[MatchGuard, Omitted]);
    MatchGuard => Seq(&[IfKw, Expression]);
    MatchPattern => Alt(&[VarPattern, ListPattern, MappingPattern, ConstPattern]);
    VarPattern => Seq(&[VarKw, VarName]);
    ListPattern => Seq(&[OpenBracket, ListPatternItems, CloseBracket]);
    ListPatternItems => Many(ListPatternItem);
    ListPatternItem => Alt(&[RestPattern, MatchPattern, Comma]);
    MappingPattern => Seq(&[OpenBrace, FieldPatterns, CloseBrace]);
    FieldPatterns => Many(FieldPatternItem);
    FieldPatternItem => Alt(&[RestPattern, FieldPattern, Comma]);
    FieldPattern => Seq(&[FieldName, Colon, MatchPattern]);
    RestPattern => Seq(&[Ellipsis, VarKw, VarName]);
    ConstPattern => Alt(&[Literal, NameRef, NegativeLiteral]);
    NegativeLiteral => Seq(&[MinusSign, Literal]);
    MinusSign => tok!(Minus);
    ExprLedStmt => Seq(&[Expression, ExprStmtRhs, Semicolon]);
    ExprStmtRhs => Alt(&[AssignRhs, CompoundRhs, Omitted]);
    AssignRhs => Seq(&[AssignOp, Expression]);
    CompoundRhs => Seq(&[CompoundOp, AssignOp, Expression]);
    CompoundOp => toks!(Plus: set::COMPOUND_OP);

    // Expressions.
    Expression => Seq(&[Operand, ExprTail]);
    ExprTail => Many(ExprSuffix);
    ExprSuffix => Alt(&[
        BinaryRhs, CallSuffix, MemberSuffix, IndexSuffix, ConditionalRhs, IsRhs,
        XmlFilterSuffix, XmlStepSuffix,
    ]);
    BinaryRhs => Seq(&[BinaryOp, Expression]);
    BinaryOp => toks!(Plus: set::BINARY_OP);
    CallSuffix => Seq(&[OpenParen, Args, CloseParen]);
    MemberSuffix => Seq(&[MemberAccess, FieldName, CallOpt]);
    MemberAccess => toks!(Dot: set::MEMBER_ACCESS);
    CallOpt => Alt(&[CallSuffix, Omitted]);
    IndexSuffix => Seq(&[OpenBracket, Expression, CloseBracket]);
    ConditionalRhs => Seq(&[QuestionMark, Expression, Colon, Expression]);
    IsRhs => Seq(&[IsKw, TypeDesc]);
    IsKw => tok!(IsKw);
    XmlFilterSuffix => Seq(&[DotLt, XmlNamePatterns, AngleClose]);
    DotLt => tok!(DotLt);
    XmlStepSuffix => Alt(&[XmlStepAll, XmlStepChildren, XmlStepDescendants]);
    XmlStepAll => tok!(SlashAsterisk);
    XmlStepChildren => Seq(&[Slash, AngleOpen, XmlNamePatterns, AngleClose]);
    XmlStepDescendants => Seq(&[XmlDescendantsStart, XmlNamePatterns, AngleClose]);
    XmlDescendantsStart => tok!(DoubleSlashDoubleAsteriskLt);
    XmlNamePatterns => Seq(&[XmlNamePatternItem, XmlNamePatternTail]);
    XmlNamePatternTail => Many(XmlNamePatternMore);
    XmlNamePatternMore => Seq(&[Pipe, XmlNamePatternItem]);
    XmlNamePatternItem => Alt(&[Asterisk, XmlName]);
    XmlName => Seq(&[Identifier, XmlQualifierOpt]);
    XmlQualifierOpt => Alt(&[XmlQualifiedSuffix, Omitted]);
    XmlQualifiedSuffix => Seq(&[Colon, XmlLocalName]);
    XmlLocalName => toks!(Ident: syntax_set!(Ident, Asterisk));
    Operand => Alt(&[
        Literal, NameRef, ParenExpr, ListCtor, MappingCtor, UnaryExpr, TypeCast,
        CheckExpr, TrapExpr, TypeofExpr, TemplateExpr, NewExpr, ErrorCtor,
    ]);
    Literal => toks!(Int: set::LITERAL);
    ParenExpr => Seq(&[OpenParen, ParenInner, CloseParen]);
    ParenInner => Alt(&[Expression, Omitted]);
    ListCtor => Seq(&[OpenBracket, ListItems, CloseBracket]);
    ListItems => Many(ListItem);
    ListItem => Alt(&[Expression, Comma]);
    MappingCtor => Seq(&[OpenBrace, MappingFields, CloseBrace]);
    MappingFields => Many(MappingItem);
    MappingItem => Alt(&[SpecificField, ComputedField, SpreadField, Comma]);
    SpecificField => Seq(&[FieldKey, FieldValueOpt]);
    FieldKey => toks!(Ident: syntax_set!(Ident, String));
    FieldValueOpt => Alt(&[FieldValue, Omitted]);
    FieldValue => Seq(&[Colon, Expression]);
    ComputedField => Seq(&[OpenBracket, Expression, CloseBracket, Colon, Expression]);
    SpreadField => Seq(&[Ellipsis, Expression]);
    UnaryExpr => Seq(&[UnaryOp, Expression]);
    UnaryOp => toks!(Minus: set::UNARY_OP);
    TypeCast => Seq(&[AngleOpen, TypeDesc, AngleClose, Expression]);
    CheckExpr => Seq(&[CheckKw, Expression]);
    CheckKw => toks!(CheckKw: syntax_set!(CheckKw, CheckPanicKw));
    TrapExpr => Seq(&[TrapKw, Expression]);
    TrapKw => tok!(TrapKw);
    TypeofExpr => Seq(&[TypeofKw, Expression]);
    TypeofKw => tok!(TypeofKw);
    TemplateExpr => Seq(&[TemplatePrefix, TemplateStart, TemplateItems, TemplateEnd]);
    TemplatePrefix => Alt(&[TemplateKw, Omitted]);
    TemplateKw => toks!(StringKw: syntax_set!(StringKw, XmlKw));
    TemplateStart => tok!(Backtick);
    TemplateEnd => tok!(Backtick);
    TemplateItems => Many(TemplateItem);
    TemplateItem => Alt(&[TemplateText, Interpolation]);
    TemplateText => tok!(TemplateString);
    Interpolation => Seq(&[InterpolationStart, Expression, InterpolationEnd]);
    InterpolationStart => tok!(InterpolationStart);
    InterpolationEnd => tok!(CloseBrace);
    NewExpr => Seq(&[NewKw, NewTarget, CallOpt]);
    NewKw => tok!(NewKw);
    NewTarget => Alt(&[NameRef, Omitted]);
    ErrorCtor => Seq(&[ErrorKw, CallSuffix]);
    Args => Many(ArgItem);
    ArgItem => Alt(&[NamedArg, RestArg, Expression, Comma]);
    NamedArg => Seq(&[ArgName, AssignOp, Expression]);
    ArgName => tok!(Ident);
    RestArg => Seq(&[Ellipsis, Expression]);

    // Entry points for fragments.
    StatementEntry => Seq(&[Statement, EndOfFile]);
    ExpressionEntry => Seq(&[Expression, EndOfFile]);
    TypeDescEntry => Seq(&[TypeDesc, EndOfFile]);
}

/// The FIRST set and nullability of every context, computed by fixed point.
static FIRST: LazyLock<Vec<(SyntaxSet, bool)>> = LazyLock::new(|| {
    let mut table = vec![(SyntaxSet::new(), false); Ctx::ALL.len()];
    loop {
        let mut changed = false;
        for &ctx in Ctx::ALL {
            let (first, nullable) = match ctx.rule() {
                Rule::Token(set, _) => (set, false),
                Rule::Empty => (SyntaxSet::new(), true),
                Rule::Many(item) => (table[item as usize].0, true),
                Rule::Alt(alts) => alts.iter().fold((SyntaxSet::new(), false), |acc, &alt| {
                    let (first, nullable) = table[alt as usize];
                    (acc.0.union(first), acc.1 || nullable)
                }),
                Rule::Seq(items) => {
                    let mut first = SyntaxSet::new();
                    let mut nullable = true;
                    for &item in items {
                        let (set, item_nullable) = table[item as usize];
                        first = first.union(set);
                        if !item_nullable {
                            nullable = false;
                            break;
                        }
                    }
                    (first, nullable)
                }
            };
            if table[ctx as usize] != (first, nullable) {
                table[ctx as usize] = (first, nullable);
                changed = true;
            }
        }
        if !changed {
            return table;
        }
    }
});

impl Ctx {
    /// The kinds that can start this context.
    pub fn first(self) -> SyntaxSet {
        FIRST[self as usize].0
    }

    /// Whether this context can match nothing.
    pub fn nullable(self) -> bool {
        FIRST[self as usize].1
    }

    /// Whether recovery may synthesize this context as a whole: a single
    /// token, or a type descriptor or expression standing in for a missing
    /// one.
    pub fn insertable(self) -> bool {
        self.is_whole() || self.insert_kind().is_some()
    }

    /// Whether this is a non-token context that recovery treats as a unit.
    pub fn is_whole(self) -> bool {
        matches!(
            self,
            Self::TypeDesc | Self::Expression | Self::Operand | Self::MatchPattern
        )
    }

    /// The kind of the missing token recovery inserts for this context.
    pub fn insert_kind(self) -> Option<SyntaxKind> {
        match self.rule() {
            Rule::Token(_, SyntaxKind::Eof) => None,
            Rule::Token(_, kind) => Some(kind),
            _ if self.is_whole() => Some(SyntaxKind::Ident),
            _ => None,
        }
    }

    /// The diagnostic for a missing instance of this context.
    pub fn missing_code(self) -> DiagnosticCode {
        match self {
            Self::TypeDesc | Self::TypeDescPrimary => DiagnosticCode::MissingTypeDesc,
            Self::Expression | Self::Operand => DiagnosticCode::MissingExpression,
            Self::MatchPattern => DiagnosticCode::MissingMatchPattern,
            _ => DiagnosticCode::Missing(self.insert_kind().unwrap_or(SyntaxKind::Ident)),
        }
    }

    /// Whether matching `ctx` can happen while matching `self`, without
    /// entering a sequence. `Some(true)` when a repetition is involved, so
    /// that the position stays put for the next round.
    pub fn covers(self, ctx: Ctx) -> Option<bool> {
        if self == ctx {
            return Some(false);
        }
        match self.rule() {
            Rule::Alt(alts) => alts.iter().find_map(|alt| alt.covers(ctx)),
            Rule::Many(item) => item.covers(ctx).map(|_| true),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_index_table() {
        assert!(Ctx::ALL.len() > 256);
        for (i, &ctx) in Ctx::ALL.iter().enumerate() {
            assert_eq!(ctx as usize, i);
        }
        assert_eq!(Ctx::ALL.last(), Some(&Ctx::TypeDescEntry));
    }

    #[test]
    fn test_first_sets() {
        assert!(Ctx::Statement.first().contains(SyntaxKind::IfKw));
        assert!(Ctx::Statement.first().contains(SyntaxKind::Ident));
        assert!(Ctx::TypeDesc.first().contains(SyntaxKind::RecordKw));
        assert!(Ctx::TypeDesc.first().contains(SyntaxKind::ClientKw));
        assert!(Ctx::Expression.first().contains(SyntaxKind::Backtick));
        assert!(Ctx::Expression.first().contains(SyntaxKind::StringKw));
        assert!(!Ctx::Expression.first().contains(SyntaxKind::Semicolon));
        assert!(Ctx::Param.first().contains(SyntaxKind::At));
        assert!(Ctx::ExprTail.nullable());
        assert!(!Ctx::Block.nullable());
        assert!(Ctx::ModuleVarDecl.first().contains(SyntaxKind::FinalKw));
        assert!(Ctx::Statement.first().contains(SyntaxKind::MatchKw));
        assert!(Ctx::ModuleMember.first().contains(SyntaxKind::ServiceKw));
        assert!(Ctx::ExprSuffix.first().contains(SyntaxKind::DotLt));
        assert!(Ctx::MatchPattern.first().contains(SyntaxKind::Minus));
        assert!(!Ctx::MatchPattern.first().contains(SyntaxKind::Pipe));
    }

    #[test]
    fn test_repetitions_consume() {
        for &ctx in Ctx::ALL {
            if let Rule::Many(item) = ctx.rule() {
                assert!(!item.nullable(), "{ctx:?} repeats nullable {item:?}");
            }
        }
    }

    #[test]
    fn test_no_left_recursion() {
        // Contexts reachable without consuming a token must form a DAG.
        fn visit(ctx: Ctx, path: &mut Vec<Ctx>) {
            assert!(!path.contains(&ctx), "left recursion: {path:?} -> {ctx:?}");
            path.push(ctx);
            match ctx.rule() {
                Rule::Alt(alts) => alts.iter().for_each(|&alt| visit(alt, path)),
                Rule::Many(item) => visit(item, path),
                Rule::Seq(items) => {
                    for &item in items {
                        visit(item, path);
                        if !item.nullable() {
                            break;
                        }
                    }
                }
                Rule::Token(..) | Rule::Empty => {}
            }
            path.pop();
        }

        for &ctx in Ctx::ALL {
            visit(ctx, &mut vec![]);
        }
    }

    #[test]
    fn test_covers() {
        assert_eq!(Ctx::ModuleMembers.covers(Ctx::FuncDef), Some(true));
        assert_eq!(Ctx::FuncBody.covers(Ctx::ExprBody), Some(false));
        assert_eq!(Ctx::Statement.covers(Ctx::LocalVarDecl), Some(false));
        assert_eq!(Ctx::FuncDef.covers(Ctx::FunctionKw), None);
    }

    #[test]
    fn test_missing_codes() {
        assert_eq!(Ctx::TypeDesc.missing_code(), DiagnosticCode::MissingTypeDesc);
        assert_eq!(Ctx::Expression.missing_code(), DiagnosticCode::MissingExpression);
        assert_eq!(
            Ctx::OpenBrace.missing_code(),
            DiagnosticCode::Missing(SyntaxKind::OpenBrace)
        );
        assert_eq!(Ctx::EndOfFile.insert_kind(), None);
        assert_eq!(Ctx::MatchPattern.missing_code(), DiagnosticCode::MissingMatchPattern);
        assert!(Ctx::MatchPattern.insertable());
    }
}
