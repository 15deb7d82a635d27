/// A syntactical building block of a source file.
///
/// Can be emitted as a token by the lexer or as part of a syntax node by the
/// parser. Tokens come first, then trivia, then inner nodes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    /// The `int` keyword.
    IntKw,
    /// The `float` keyword.
    FloatKw,
    /// The `string` keyword.
    StringKw,
    /// The `boolean` keyword.
    BooleanKw,
    /// The `decimal` keyword.
    DecimalKw,
    /// The `xml` keyword.
    XmlKw,
    /// The `json` keyword.
    JsonKw,
    /// The `handle` keyword.
    HandleKw,
    /// The `any` keyword.
    AnyKw,
    /// The `anydata` keyword.
    AnydataKw,
    /// The `never` keyword.
    NeverKw,
    /// The `byte` keyword.
    ByteKw,
    /// The `public` keyword.
    PublicKw,
    /// The `private` keyword.
    PrivateKw,
    /// The `function` keyword.
    FunctionKw,
    /// The `return` keyword.
    ReturnKw,
    /// The `returns` keyword.
    ReturnsKw,
    /// The `external` keyword.
    ExternalKw,
    /// The `type` keyword.
    TypeKw,
    /// The `record` keyword.
    RecordKw,
    /// The `object` keyword.
    ObjectKw,
    /// The `remote` keyword.
    RemoteKw,
    /// The `abstract` keyword.
    AbstractKw,
    /// The `client` keyword.
    ClientKw,
    /// The `if` keyword.
    IfKw,
    /// The `else` keyword.
    ElseKw,
    /// The `while` keyword.
    WhileKw,
    /// The `true` keyword.
    TrueKw,
    /// The `false` keyword.
    FalseKw,
    /// The `check` keyword.
    CheckKw,
    /// The `fail` keyword.
    FailKw,
    /// The `checkpanic` keyword.
    CheckPanicKw,
    /// The `continue` keyword.
    ContinueKw,
    /// The `break` keyword.
    BreakKw,
    /// The `panic` keyword.
    PanicKw,
    /// The `import` keyword.
    ImportKw,
    /// The `version` keyword.
    VersionKw,
    /// The `as` keyword.
    AsKw,
    /// The `service` keyword.
    ServiceKw,
    /// The `on` keyword.
    OnKw,
    /// The `resource` keyword.
    ResourceKw,
    /// The `listener` keyword.
    ListenerKw,
    /// The `const` keyword.
    ConstKw,
    /// The `final` keyword.
    FinalKw,
    /// The `typeof` keyword.
    TypeofKw,
    /// The `is` keyword.
    IsKw,
    /// The `null` keyword.
    NullKw,
    /// The `lock` keyword.
    LockKw,
    /// The `annotation` keyword.
    AnnotationKw,
    /// The `source` keyword.
    SourceKw,
    /// The `var` keyword.
    VarKw,
    /// The `worker` keyword.
    WorkerKw,
    /// The `parameter` keyword.
    ParameterKw,
    /// The `field` keyword.
    FieldKw,
    /// The `xmlns` keyword.
    XmlnsKw,
    /// The `fork` keyword.
    ForkKw,
    /// The `map` keyword.
    MapKw,
    /// The `future` keyword.
    FutureKw,
    /// The `typedesc` keyword.
    TypedescKw,
    /// The `trap` keyword.
    TrapKw,
    /// The `in` keyword.
    InKw,
    /// The `foreach` keyword.
    ForeachKw,
    /// The `table` keyword.
    TableKw,
    /// The `error` keyword.
    ErrorKw,
    /// The `let` keyword.
    LetKw,
    /// The `stream` keyword.
    StreamKw,
    /// The `new` keyword.
    NewKw,
    /// The `readonly` keyword.
    ReadonlyKw,
    /// The `distinct` keyword.
    DistinctKw,
    /// The `from` keyword.
    FromKw,
    /// The `where` keyword.
    WhereKw,
    /// The `select` keyword.
    SelectKw,
    /// The `start` keyword.
    StartKw,
    /// The `flush` keyword.
    FlushKw,
    /// The `default` keyword.
    DefaultKw,
    /// The `wait` keyword.
    WaitKw,
    /// The `do` keyword.
    DoKw,
    /// The `transaction` keyword.
    TransactionKw,
    /// The `commit` keyword.
    CommitKw,
    /// The `retry` keyword.
    RetryKw,
    /// The `rollback` keyword.
    RollbackKw,
    /// The `transactional` keyword.
    TransactionalKw,
    /// The `enum` keyword.
    EnumKw,
    /// The `base16` keyword.
    Base16Kw,
    /// The `base64` keyword.
    Base64Kw,
    /// The `match` keyword.
    MatchKw,
    /// The `conflict` keyword.
    ConflictKw,
    /// The `limit` keyword.
    LimitKw,
    /// The `join` keyword.
    JoinKw,
    /// The `outer` keyword.
    OuterKw,
    /// The `equals` keyword.
    EqualsKw,
    /// The `order` keyword.
    OrderKw,
    /// The `by` keyword.
    ByKw,
    /// The `ascending` keyword.
    AscendingKw,
    /// The `descending` keyword.
    DescendingKw,
    /// A left curly brace: `{`.
    OpenBrace,
    /// A right curly brace: `}`.
    CloseBrace,
    /// A left parenthesis: `(`.
    OpenParen,
    /// A right parenthesis: `)`.
    CloseParen,
    /// A left square bracket: `[`.
    OpenBracket,
    /// A right square bracket: `]`.
    CloseBracket,
    /// A semicolon: `;`.
    Semicolon,
    /// A dot: `.`.
    Dot,
    /// A colon: `:`.
    Colon,
    /// A comma: `,`.
    Comma,
    /// Three dots: `...`.
    Ellipsis,
    /// The opening delimiter of a closed record: `{|`.
    OpenBracePipe,
    /// The closing delimiter of a closed record: `|}`.
    CloseBracePipe,
    /// An at sign: `@`.
    At,
    /// A backtick delimiting a template: ```.
    Backtick,
    /// The assignment operator: `=`.
    Assign,
    /// The equality operator: `==`.
    EqEq,
    /// The reference equality operator: `===`.
    EqEqEq,
    /// The addition operator: `+`.
    Plus,
    /// The subtraction operator: `-`.
    Minus,
    /// The division operator: `/`.
    Slash,
    /// The modulo operator: `%`.
    Percent,
    /// The multiplication operator: `*`.
    Asterisk,
    /// The less-than operator: `<`.
    Lt,
    /// The less-than-or-equal operator: `<=`.
    LtEq,
    /// The greater-than operator: `>`.
    Gt,
    /// The greater-than-or-equal operator: `>=`.
    GtEq,
    /// The expression body arrow: `=>`.
    RightDoubleArrow,
    /// A question mark: `?`.
    QuestionMark,
    /// The bitwise or and union operator: `|`.
    Pipe,
    /// The logical negation operator: `!`.
    Exclamation,
    /// The inequality operator: `!=`.
    NotEq,
    /// The reference inequality operator: `!==`.
    NotEqEq,
    /// The bitwise and and intersection operator: `&`.
    BitAnd,
    /// The bitwise xor operator: `^`.
    BitXor,
    /// The logical and operator: `&&`.
    LogicalAnd,
    /// The logical or operator: `||`.
    LogicalOr,
    /// The bitwise complement operator: `~`.
    Negation,
    /// The worker send arrow: `->`.
    RightArrow,
    /// The synchronous worker send arrow: `->>`.
    SyncSend,
    /// The worker receive arrow: `<-`.
    LeftArrow,
    /// The start of an interpolation: `${`.
    InterpolationStart,
    /// The exclusive range operator: `..<`.
    DoubleDotLt,
    /// The left shift operator: `<<`.
    DoubleLt,
    /// The operator part of a `>>=` compound assignment: `>>`.
    DoubleGt,
    /// The operator part of a `>>>=` compound assignment: `>>>`.
    TripleGt,
    /// The annotation access operator: `.@`.
    AnnotChaining,
    /// The optional field access operator: `?.`.
    OptionalChaining,
    /// The elvis operator: `?:`.
    Elvis,
    /// The start of an XML filter: `.<`.
    DotLt,
    /// The XML step to all children: `/*`.
    SlashAsterisk,
    /// The start of an XML step to descendants: `/**/<`.
    DoubleSlashDoubleAsteriskLt,
    /// An identifier: `foo`, `'if`.
    Ident,
    /// A string literal: `"hello"`.
    String,
    /// A decimal integer literal: `12`.
    Int,
    /// A hexadecimal integer literal: `0xff`.
    HexInt,
    /// A floating point literal: `1.5e3`, `.5f`.
    Float,
    /// A hexadecimal floating point literal: `0x1.8p1`.
    HexFloat,
    /// Literal text inside a template.
    TemplateString,
    /// One or more documentation lines: `# ...`.
    DocString,
    /// A fragment of text the lexer or parser skipped.
    Invalid,
    /// The end of the input.
    Eof,
    /// Spaces, tabs or form feeds.
    Whitespace,
    /// A line break: `\n`, `\r\n` or `\r`.
    EndOfLine,
    /// A line comment: `// ...`.
    Comment,
    /// A whole source file.
    CompilationUnit,
    /// A statement, expression or type descriptor parsed on its own.
    Fragment,
    /// A homogeneous sequence of nodes.
    List,
    /// An import declaration: `import org/a.b version 1.0 as c;`.
    ImportDecl,
    /// The organization part of an import: `org/`.
    ImportOrgName,
    /// The version part of an import: `version 1.0`.
    ImportVersion,
    /// The prefix part of an import: `as c`.
    ImportPrefix,
    /// Documentation and annotations attached to a construct.
    Metadata,
    /// An annotation: `@display { label: "x" }`.
    Annotation,
    /// A function definition: `function f() { }`.
    FunctionDefinition,
    /// A parameter list with an optional return type.
    FunctionSignature,
    /// A required parameter: `int x`.
    RequiredParam,
    /// A defaultable parameter: `int x = 1`.
    DefaultableParam,
    /// A rest parameter: `int... xs`.
    RestParam,
    /// A return type: `returns int`.
    ReturnTypeDesc,
    /// A block function body: `{ ... }`.
    FunctionBodyBlock,
    /// An external function body: `= external;`.
    ExternalFunctionBody,
    /// An expression function body: `=> x;`.
    ExpressionFunctionBody,
    /// A type definition: `type T int;`.
    TypeDefinition,
    /// A module level variable declaration.
    ModuleVarDecl,
    /// A constant declaration: `const X = 1;`.
    ConstantDecl,
    /// A listener declaration: `listener L l = new;`.
    ListenerDecl,
    /// An enum declaration: `enum Color { Red, Green }`.
    EnumDecl,
    /// A member of an enum declaration.
    EnumMember,
    /// A built-in simple type: `int`, `string`.
    BuiltinType,
    /// A reference to a name: `x`.
    SimpleNameRef,
    /// A reference to a name in a module: `io:println`.
    QualifiedNameRef,
    /// The nil type: `()`.
    NilTypeDesc,
    /// A parenthesized type descriptor: `(int|string)`.
    ParenTypeDesc,
    /// A tuple type descriptor: `[int, string...]`.
    TupleTypeDesc,
    /// The rest member of a tuple type: `string...`.
    RestTypeDesc,
    /// A record type descriptor: `record {| int x; |}`.
    RecordTypeDesc,
    /// A record field: `int x;`, `int x?;`.
    RecordField,
    /// A record field with a default value: `int x = 1;`.
    RecordFieldWithDefault,
    /// The rest descriptor of a record: `string...;`.
    RecordRestDesc,
    /// A type inclusion: `*T;`.
    TypeInclusion,
    /// An object type descriptor: `object { }`.
    ObjectTypeDesc,
    /// A field of an object type.
    ObjectField,
    /// A method declaration without a body.
    MethodDeclaration,
    /// A method definition with a body.
    MethodDefinition,
    /// A parameterized type descriptor: `map<int>`.
    ParameterizedTypeDesc,
    /// An error type descriptor: `error<Detail>`.
    ErrorTypeDesc,
    /// A function type descriptor: `function (int) returns int`.
    FunctionTypeDesc,
    /// An array type descriptor: `int[]`, `int[3]`.
    ArrayTypeDesc,
    /// An optional type descriptor: `int?`.
    OptionalTypeDesc,
    /// A union type descriptor: `int|string`.
    UnionTypeDesc,
    /// An intersection type descriptor: `A & B`.
    IntersectionTypeDesc,
    /// A distinct or readonly type descriptor: `distinct error`.
    DistinctTypeDesc,
    /// A block statement: `{ ... }`.
    Block,
    /// A local variable declaration: `int x = 1;`.
    LocalVarDecl,
    /// An assignment: `x = 1;`.
    Assignment,
    /// A compound assignment: `x += 1;`.
    CompoundAssignment,
    /// A call statement: `f();`.
    CallStatement,
    /// An expression used as a statement.
    ExpressionStatement,
    /// An if statement: `if x { } else { }`.
    IfElse,
    /// The else part of an if statement.
    ElseClause,
    /// A while loop: `while x { }`.
    While,
    /// A foreach loop: `foreach int i in xs { }`.
    Foreach,
    /// A lock statement: `lock { }`.
    Lock,
    /// A return statement: `return x;`.
    Return,
    /// A break statement: `break;`.
    Break,
    /// A continue statement: `continue;`.
    Continue,
    /// A panic statement: `panic e;`.
    Panic,
    /// A fail statement: `fail e;`.
    Fail,
    /// A binary expression: `a + b`.
    BinaryExpr,
    /// A unary expression: `-a`.
    UnaryExpr,
    /// A conditional expression: `a ? b : c`.
    ConditionalExpr,
    /// A type test: `x is int`.
    TypeTestExpr,
    /// A type cast: `<int> x`.
    TypeCastExpr,
    /// A check expression: `check f()`.
    CheckExpr,
    /// A trap expression: `trap f()`.
    TrapExpr,
    /// A typeof expression: `typeof x`.
    TypeofExpr,
    /// A basic literal: `1`, `"s"`, `true`.
    BasicLiteral,
    /// The nil literal: `()`, `null`.
    NilLiteral,
    /// A parenthesized expression: `(a)`.
    BracedExpr,
    /// A list constructor: `[1, 2]`.
    ListCtor,
    /// A mapping constructor: `{a: 1}`.
    MappingCtor,
    /// A field of a mapping constructor: `a: 1`.
    SpecificField,
    /// A computed field of a mapping constructor: `[k]: 1`.
    ComputedField,
    /// A spread field of a mapping constructor: `...m`.
    SpreadField,
    /// A function call: `f(x)`.
    FuncCall,
    /// A method call: `a.f(x)`.
    MethodCall,
    /// A named argument: `x = 1`.
    NamedArg,
    /// A rest argument: `...xs`.
    RestArg,
    /// A positional argument.
    PositionalArg,
    /// A field access: `a.b`.
    FieldAccess,
    /// An optional field access: `a?.b`.
    OptionalFieldAccess,
    /// An annotation access: `a.@b`.
    AnnotAccess,
    /// An index access: `a[1]`.
    IndexedExpr,
    /// A template: `` string `a ${b}` ``.
    TemplateExpr,
    /// An interpolation in a template: `${b}`.
    Interpolation,
    /// A new expression: `new Foo(1)`.
    NewExpr,
    /// An error constructor: `error("msg")`.
    ErrorCtor,
    /// An XML filter: `x.<a|b>`.
    XmlFilterExpr,
    /// An XML step: `x/<a>`, `x/*`, `x/**/<a>`.
    XmlStepExpr,
    /// A name pattern of an XML navigation: `ns:*`.
    XmlNamePattern,
    /// A service declaration: `service hello on ep { }`.
    ServiceDecl,
    /// A match statement: `match x { 1 => { } }`.
    MatchStatement,
    /// A clause of a match statement: `1|2 if y => { }`.
    MatchClause,
    /// A guard of a match clause: `if y`.
    MatchGuard,
    /// A variable binding in a match pattern: `var x`.
    VarMatchPattern,
    /// A list match pattern: `[1, var x]`.
    ListMatchPattern,
    /// A mapping match pattern: `{a: 1, b: var x}`.
    MappingMatchPattern,
    /// A field of a mapping match pattern: `a: 1`.
    FieldMatchPattern,
    /// The rest of a list or mapping match pattern: `...var rest`.
    RestMatchPattern,
}

impl SyntaxKind {
    /// The number of syntax kinds.
    pub const COUNT: usize = Self::RestMatchPattern as usize + 1;

    /// Every kind, indexed by discriminant.
    pub const ALL: [Self; Self::COUNT] = [
        Self::IntKw, Self::FloatKw, Self::StringKw, Self::BooleanKw, Self::DecimalKw,
        Self::XmlKw, Self::JsonKw, Self::HandleKw, Self::AnyKw, Self::AnydataKw,
        Self::NeverKw, Self::ByteKw, Self::PublicKw, Self::PrivateKw, Self::FunctionKw,
        Self::ReturnKw, Self::ReturnsKw, Self::ExternalKw, Self::TypeKw, Self::RecordKw,
        Self::ObjectKw, Self::RemoteKw, Self::AbstractKw, Self::ClientKw, Self::IfKw,
        Self::ElseKw, Self::WhileKw, Self::TrueKw, Self::FalseKw, Self::CheckKw,
        Self::FailKw, Self::CheckPanicKw, Self::ContinueKw, Self::BreakKw,
        Self::PanicKw, Self::ImportKw, Self::VersionKw, Self::AsKw, Self::ServiceKw,
        Self::OnKw, Self::ResourceKw, Self::ListenerKw, Self::ConstKw, Self::FinalKw,
        Self::TypeofKw, Self::IsKw, Self::NullKw, Self::LockKw, Self::AnnotationKw,
        Self::SourceKw, Self::VarKw, Self::WorkerKw, Self::ParameterKw, Self::FieldKw,
        Self::XmlnsKw, Self::ForkKw, Self::MapKw, Self::FutureKw, Self::TypedescKw,
        Self::TrapKw, Self::InKw, Self::ForeachKw, Self::TableKw, Self::ErrorKw,
        Self::LetKw, Self::StreamKw, Self::NewKw, Self::ReadonlyKw, Self::DistinctKw,
        Self::FromKw, Self::WhereKw, Self::SelectKw, Self::StartKw, Self::FlushKw,
        Self::DefaultKw, Self::WaitKw, Self::DoKw, Self::TransactionKw, Self::CommitKw,
        Self::RetryKw, Self::RollbackKw, Self::TransactionalKw, Self::EnumKw,
        Self::Base16Kw, Self::Base64Kw, Self::MatchKw, Self::ConflictKw, Self::LimitKw,
        Self::JoinKw, Self::OuterKw, Self::EqualsKw, Self::OrderKw, Self::ByKw,
        Self::AscendingKw, Self::DescendingKw, Self::OpenBrace, Self::CloseBrace,
        Self::OpenParen, Self::CloseParen, Self::OpenBracket, Self::CloseBracket,
        Self::Semicolon, Self::Dot, Self::Colon, Self::Comma, Self::Ellipsis,
        Self::OpenBracePipe, Self::CloseBracePipe, Self::At, Self::Backtick,
        Self::Assign, Self::EqEq, Self::EqEqEq, Self::Plus, Self::Minus, Self::Slash,
        Self::Percent, Self::Asterisk, Self::Lt, Self::LtEq, Self::Gt, Self::GtEq,
        Self::RightDoubleArrow, Self::QuestionMark, Self::Pipe, Self::Exclamation,
        Self::NotEq, Self::NotEqEq, Self::BitAnd, Self::BitXor, Self::LogicalAnd,
        Self::LogicalOr, Self::Negation, Self::RightArrow, Self::SyncSend,
        Self::LeftArrow, Self::InterpolationStart, Self::DoubleDotLt, Self::DoubleLt,
        Self::DoubleGt, Self::TripleGt, Self::AnnotChaining, Self::OptionalChaining,
        Self::Elvis, Self::DotLt, Self::SlashAsterisk,
        Self::DoubleSlashDoubleAsteriskLt, Self::Ident, Self::String, Self::Int, Self::HexInt, Self::Float,
        Self::HexFloat, Self::TemplateString, Self::DocString, Self::Invalid, Self::Eof,
        Self::Whitespace, Self::EndOfLine, Self::Comment, Self::CompilationUnit,
        Self::Fragment, Self::List, Self::ImportDecl, Self::ImportOrgName,
        Self::ImportVersion, Self::ImportPrefix, Self::Metadata, Self::Annotation,
        Self::FunctionDefinition, Self::FunctionSignature, Self::RequiredParam,
        Self::DefaultableParam, Self::RestParam, Self::ReturnTypeDesc,
        Self::FunctionBodyBlock, Self::ExternalFunctionBody,
        Self::ExpressionFunctionBody, Self::TypeDefinition, Self::ModuleVarDecl,
        Self::ConstantDecl, Self::ListenerDecl, Self::EnumDecl, Self::EnumMember,
        Self::BuiltinType, Self::SimpleNameRef, Self::QualifiedNameRef,
        Self::NilTypeDesc, Self::ParenTypeDesc, Self::TupleTypeDesc, Self::RestTypeDesc,
        Self::RecordTypeDesc, Self::RecordField, Self::RecordFieldWithDefault,
        Self::RecordRestDesc, Self::TypeInclusion, Self::ObjectTypeDesc,
        Self::ObjectField, Self::MethodDeclaration, Self::MethodDefinition,
        Self::ParameterizedTypeDesc, Self::ErrorTypeDesc, Self::FunctionTypeDesc,
        Self::ArrayTypeDesc, Self::OptionalTypeDesc, Self::UnionTypeDesc,
        Self::IntersectionTypeDesc, Self::DistinctTypeDesc, Self::Block,
        Self::LocalVarDecl, Self::Assignment, Self::CompoundAssignment,
        Self::CallStatement, Self::ExpressionStatement, Self::IfElse, Self::ElseClause,
        Self::While, Self::Foreach, Self::Lock, Self::Return, Self::Break,
        Self::Continue, Self::Panic, Self::Fail, Self::BinaryExpr, Self::UnaryExpr,
        Self::ConditionalExpr, Self::TypeTestExpr, Self::TypeCastExpr, Self::CheckExpr,
        Self::TrapExpr, Self::TypeofExpr, Self::BasicLiteral, Self::NilLiteral,
        Self::BracedExpr, Self::ListCtor, Self::MappingCtor, Self::SpecificField,
        Self::ComputedField, Self::SpreadField, Self::FuncCall, Self::MethodCall,
        Self::NamedArg, Self::RestArg, Self::PositionalArg, Self::FieldAccess,
        Self::OptionalFieldAccess, Self::AnnotAccess, Self::IndexedExpr,
        Self::TemplateExpr, Self::Interpolation, Self::NewExpr, Self::ErrorCtor,
        Self::XmlFilterExpr, Self::XmlStepExpr, Self::XmlNamePattern, Self::ServiceDecl,
        Self::MatchStatement, Self::MatchClause, Self::MatchGuard,
        Self::VarMatchPattern, Self::ListMatchPattern, Self::MappingMatchPattern,
        Self::FieldMatchPattern, Self::RestMatchPattern,
    ];

    /// Whether this is a keyword.
    pub fn is_keyword(self) -> bool {
        self <= Self::DescendingKw
    }

    /// Whether this is a built-in simple type name like `int` or `json`.
    pub fn is_builtin_type(self) -> bool {
        self <= Self::ByteKw
    }

    /// Whether this is a token produced by the lexer.
    pub fn is_token(self) -> bool {
        self <= Self::Eof
    }

    /// Whether this kind only ever appears as trivia.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::EndOfLine | Self::Comment | Self::Invalid)
    }

    /// Whether this is an inner node kind.
    pub fn is_node(self) -> bool {
        self > Self::Comment
    }

    /// Whether this is a literal token.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Int
                | Self::HexInt
                | Self::Float
                | Self::HexFloat
                | Self::TrueKw
                | Self::FalseKw
                | Self::NullKw
        )
    }

    /// The source text of a fixed token, if it has one.
    pub fn text(self) -> Option<&'static str> {
        Some(match self {
            Self::IntKw => "int",
            Self::FloatKw => "float",
            Self::StringKw => "string",
            Self::BooleanKw => "boolean",
            Self::DecimalKw => "decimal",
            Self::XmlKw => "xml",
            Self::JsonKw => "json",
            Self::HandleKw => "handle",
            Self::AnyKw => "any",
            Self::AnydataKw => "anydata",
            Self::NeverKw => "never",
            Self::ByteKw => "byte",
            Self::PublicKw => "public",
            Self::PrivateKw => "private",
            Self::FunctionKw => "function",
            Self::ReturnKw => "return",
            Self::ReturnsKw => "returns",
            Self::ExternalKw => "external",
            Self::TypeKw => "type",
            Self::RecordKw => "record",
            Self::ObjectKw => "object",
            Self::RemoteKw => "remote",
            Self::AbstractKw => "abstract",
            Self::ClientKw => "client",
            Self::IfKw => "if",
            Self::ElseKw => "else",
            Self::WhileKw => "while",
            Self::TrueKw => "true",
            Self::FalseKw => "false",
            Self::CheckKw => "check",
            Self::FailKw => "fail",
            Self::CheckPanicKw => "checkpanic",
            Self::ContinueKw => "continue",
            Self::BreakKw => "break",
            Self::PanicKw => "panic",
            Self::ImportKw => "import",
            Self::VersionKw => "version",
            Self::AsKw => "as",
            Self::ServiceKw => "service",
            Self::OnKw => "on",
            Self::ResourceKw => "resource",
            Self::ListenerKw => "listener",
            Self::ConstKw => "const",
            Self::FinalKw => "final",
            Self::TypeofKw => "typeof",
            Self::IsKw => "is",
            Self::NullKw => "null",
            Self::LockKw => "lock",
            Self::AnnotationKw => "annotation",
            Self::SourceKw => "source",
            Self::VarKw => "var",
            Self::WorkerKw => "worker",
            Self::ParameterKw => "parameter",
            Self::FieldKw => "field",
            Self::XmlnsKw => "xmlns",
            Self::ForkKw => "fork",
            Self::MapKw => "map",
            Self::FutureKw => "future",
            Self::TypedescKw => "typedesc",
            Self::TrapKw => "trap",
            Self::InKw => "in",
            Self::ForeachKw => "foreach",
            Self::TableKw => "table",
            Self::ErrorKw => "error",
            Self::LetKw => "let",
            Self::StreamKw => "stream",
            Self::NewKw => "new",
            Self::ReadonlyKw => "readonly",
            Self::DistinctKw => "distinct",
            Self::FromKw => "from",
            Self::WhereKw => "where",
            Self::SelectKw => "select",
            Self::StartKw => "start",
            Self::FlushKw => "flush",
            Self::DefaultKw => "default",
            Self::WaitKw => "wait",
            Self::DoKw => "do",
            Self::TransactionKw => "transaction",
            Self::CommitKw => "commit",
            Self::RetryKw => "retry",
            Self::RollbackKw => "rollback",
            Self::TransactionalKw => "transactional",
            Self::EnumKw => "enum",
            Self::Base16Kw => "base16",
            Self::Base64Kw => "base64",
            Self::MatchKw => "match",
            Self::ConflictKw => "conflict",
            Self::LimitKw => "limit",
            Self::JoinKw => "join",
            Self::OuterKw => "outer",
            Self::EqualsKw => "equals",
            Self::OrderKw => "order",
            Self::ByKw => "by",
            Self::AscendingKw => "ascending",
            Self::DescendingKw => "descending",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Ellipsis => "...",
            Self::OpenBracePipe => "{|",
            Self::CloseBracePipe => "|}",
            Self::At => "@",
            Self::Backtick => "`",
            Self::Assign => "=",
            Self::EqEq => "==",
            Self::EqEqEq => "===",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Asterisk => "*",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::RightDoubleArrow => "=>",
            Self::QuestionMark => "?",
            Self::Pipe => "|",
            Self::Exclamation => "!",
            Self::NotEq => "!=",
            Self::NotEqEq => "!==",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Negation => "~",
            Self::RightArrow => "->",
            Self::SyncSend => "->>",
            Self::LeftArrow => "<-",
            Self::InterpolationStart => "${",
            Self::DoubleDotLt => "..<",
            Self::DoubleLt => "<<",
            Self::DoubleGt => ">>",
            Self::TripleGt => ">>>",
            Self::AnnotChaining => ".@",
            Self::OptionalChaining => "?.",
            Self::Elvis => "?:",
            Self::DotLt => ".<",
            Self::SlashAsterisk => "/*",
            Self::DoubleSlashDoubleAsteriskLt => "/**/<",
            _ => return None,
        })
    }

    /// A human-readable name for the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::IntKw => "int keyword",
            Self::FloatKw => "float keyword",
            Self::StringKw => "string keyword",
            Self::BooleanKw => "boolean keyword",
            Self::DecimalKw => "decimal keyword",
            Self::XmlKw => "xml keyword",
            Self::JsonKw => "json keyword",
            Self::HandleKw => "handle keyword",
            Self::AnyKw => "any keyword",
            Self::AnydataKw => "anydata keyword",
            Self::NeverKw => "never keyword",
            Self::ByteKw => "byte keyword",
            Self::PublicKw => "public keyword",
            Self::PrivateKw => "private keyword",
            Self::FunctionKw => "function keyword",
            Self::ReturnKw => "return keyword",
            Self::ReturnsKw => "returns keyword",
            Self::ExternalKw => "external keyword",
            Self::TypeKw => "type keyword",
            Self::RecordKw => "record keyword",
            Self::ObjectKw => "object keyword",
            Self::RemoteKw => "remote keyword",
            Self::AbstractKw => "abstract keyword",
            Self::ClientKw => "client keyword",
            Self::IfKw => "if keyword",
            Self::ElseKw => "else keyword",
            Self::WhileKw => "while keyword",
            Self::TrueKw => "true keyword",
            Self::FalseKw => "false keyword",
            Self::CheckKw => "check keyword",
            Self::FailKw => "fail keyword",
            Self::CheckPanicKw => "checkpanic keyword",
            Self::ContinueKw => "continue keyword",
            Self::BreakKw => "break keyword",
            Self::PanicKw => "panic keyword",
            Self::ImportKw => "import keyword",
            Self::VersionKw => "version keyword",
            Self::AsKw => "as keyword",
            Self::ServiceKw => "service keyword",
            Self::OnKw => "on keyword",
            Self::ResourceKw => "resource keyword",
            Self::ListenerKw => "listener keyword",
            Self::ConstKw => "const keyword",
            Self::FinalKw => "final keyword",
            Self::TypeofKw => "typeof keyword",
            Self::IsKw => "is keyword",
            Self::NullKw => "null keyword",
            Self::LockKw => "lock keyword",
            Self::AnnotationKw => "annotation keyword",
            Self::SourceKw => "source keyword",
            Self::VarKw => "var keyword",
            Self::WorkerKw => "worker keyword",
            Self::ParameterKw => "parameter keyword",
            Self::FieldKw => "field keyword",
            Self::XmlnsKw => "xmlns keyword",
            Self::ForkKw => "fork keyword",
            Self::MapKw => "map keyword",
            Self::FutureKw => "future keyword",
            Self::TypedescKw => "typedesc keyword",
            Self::TrapKw => "trap keyword",
            Self::InKw => "in keyword",
            Self::ForeachKw => "foreach keyword",
            Self::TableKw => "table keyword",
            Self::ErrorKw => "error keyword",
            Self::LetKw => "let keyword",
            Self::StreamKw => "stream keyword",
            Self::NewKw => "new keyword",
            Self::ReadonlyKw => "readonly keyword",
            Self::DistinctKw => "distinct keyword",
            Self::FromKw => "from keyword",
            Self::WhereKw => "where keyword",
            Self::SelectKw => "select keyword",
            Self::StartKw => "start keyword",
            Self::FlushKw => "flush keyword",
            Self::DefaultKw => "default keyword",
            Self::WaitKw => "wait keyword",
            Self::DoKw => "do keyword",
            Self::TransactionKw => "transaction keyword",
            Self::CommitKw => "commit keyword",
            Self::RetryKw => "retry keyword",
            Self::RollbackKw => "rollback keyword",
            Self::TransactionalKw => "transactional keyword",
            Self::EnumKw => "enum keyword",
            Self::Base16Kw => "base16 keyword",
            Self::Base64Kw => "base64 keyword",
            Self::MatchKw => "match keyword",
            Self::ConflictKw => "conflict keyword",
            Self::LimitKw => "limit keyword",
            Self::JoinKw => "join keyword",
            Self::OuterKw => "outer keyword",
            Self::EqualsKw => "equals keyword",
            Self::OrderKw => "order keyword",
            Self::ByKw => "by keyword",
            Self::AscendingKw => "ascending keyword",
            Self::DescendingKw => "descending keyword",
            Self::OpenBrace => "open brace",
            Self::CloseBrace => "close brace",
            Self::OpenParen => "open parenthesis",
            Self::CloseParen => "close parenthesis",
            Self::OpenBracket => "open bracket",
            Self::CloseBracket => "close bracket",
            Self::Semicolon => "semicolon",
            Self::Dot => "dot",
            Self::Colon => "colon",
            Self::Comma => "comma",
            Self::Ellipsis => "ellipsis",
            Self::OpenBracePipe => "open brace pipe",
            Self::CloseBracePipe => "close brace pipe",
            Self::At => "at",
            Self::Backtick => "backtick",
            Self::Assign => "equals",
            Self::EqEq => "double equals",
            Self::EqEqEq => "triple equals",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Slash => "slash",
            Self::Percent => "percent",
            Self::Asterisk => "asterisk",
            Self::Lt => "less than",
            Self::LtEq => "less than or equal",
            Self::Gt => "greater than",
            Self::GtEq => "greater than or equal",
            Self::RightDoubleArrow => "right double arrow",
            Self::QuestionMark => "question mark",
            Self::Pipe => "pipe",
            Self::Exclamation => "exclamation mark",
            Self::NotEq => "not equal",
            Self::NotEqEq => "not double equal",
            Self::BitAnd => "ampersand",
            Self::BitXor => "caret",
            Self::LogicalAnd => "logical and",
            Self::LogicalOr => "logical or",
            Self::Negation => "tilde",
            Self::RightArrow => "right arrow",
            Self::SyncSend => "sync send arrow",
            Self::LeftArrow => "left arrow",
            Self::InterpolationStart => "interpolation start",
            Self::DoubleDotLt => "exclusive range",
            Self::DoubleLt => "left shift",
            Self::DoubleGt => "right shift",
            Self::TripleGt => "unsigned right shift",
            Self::AnnotChaining => "annotation access",
            Self::OptionalChaining => "optional chaining",
            Self::Elvis => "elvis",
            Self::DotLt => "xml filter start",
            Self::SlashAsterisk => "xml children step",
            Self::DoubleSlashDoubleAsteriskLt => "xml descendants step",
            Self::Ident => "identifier",
            Self::String => "string literal",
            Self::Int => "integer literal",
            Self::HexInt => "hex integer literal",
            Self::Float => "floating point literal",
            Self::HexFloat => "hex floating point literal",
            Self::TemplateString => "template string",
            Self::DocString => "documentation string",
            Self::Invalid => "invalid token",
            Self::Eof => "end of file",
            Self::Whitespace => "whitespace",
            Self::EndOfLine => "end of line",
            Self::Comment => "comment",
            Self::CompilationUnit => "compilation unit",
            Self::Fragment => "fragment",
            Self::List => "list",
            Self::ImportDecl => "import declaration",
            Self::ImportOrgName => "organization name",
            Self::ImportVersion => "import version",
            Self::ImportPrefix => "import prefix",
            Self::Metadata => "metadata",
            Self::Annotation => "annotation",
            Self::FunctionDefinition => "function definition",
            Self::FunctionSignature => "function signature",
            Self::RequiredParam => "required parameter",
            Self::DefaultableParam => "defaultable parameter",
            Self::RestParam => "rest parameter",
            Self::ReturnTypeDesc => "return type descriptor",
            Self::FunctionBodyBlock => "function body block",
            Self::ExternalFunctionBody => "external function body",
            Self::ExpressionFunctionBody => "expression function body",
            Self::TypeDefinition => "type definition",
            Self::ModuleVarDecl => "module variable declaration",
            Self::ConstantDecl => "constant declaration",
            Self::ListenerDecl => "listener declaration",
            Self::EnumDecl => "enum declaration",
            Self::EnumMember => "enum member",
            Self::BuiltinType => "built-in type",
            Self::SimpleNameRef => "name reference",
            Self::QualifiedNameRef => "qualified name reference",
            Self::NilTypeDesc => "nil type descriptor",
            Self::ParenTypeDesc => "parenthesized type descriptor",
            Self::TupleTypeDesc => "tuple type descriptor",
            Self::RestTypeDesc => "rest type descriptor",
            Self::RecordTypeDesc => "record type descriptor",
            Self::RecordField => "record field",
            Self::RecordFieldWithDefault => "record field with default",
            Self::RecordRestDesc => "record rest descriptor",
            Self::TypeInclusion => "type inclusion",
            Self::ObjectTypeDesc => "object type descriptor",
            Self::ObjectField => "object field",
            Self::MethodDeclaration => "method declaration",
            Self::MethodDefinition => "method definition",
            Self::ParameterizedTypeDesc => "parameterized type descriptor",
            Self::ErrorTypeDesc => "error type descriptor",
            Self::FunctionTypeDesc => "function type descriptor",
            Self::ArrayTypeDesc => "array type descriptor",
            Self::OptionalTypeDesc => "optional type descriptor",
            Self::UnionTypeDesc => "union type descriptor",
            Self::IntersectionTypeDesc => "intersection type descriptor",
            Self::DistinctTypeDesc => "distinct type descriptor",
            Self::Block => "block",
            Self::LocalVarDecl => "local variable declaration",
            Self::Assignment => "assignment",
            Self::CompoundAssignment => "compound assignment",
            Self::CallStatement => "call statement",
            Self::ExpressionStatement => "expression statement",
            Self::IfElse => "if statement",
            Self::ElseClause => "else clause",
            Self::While => "while statement",
            Self::Foreach => "foreach statement",
            Self::Lock => "lock statement",
            Self::Return => "return statement",
            Self::Break => "break statement",
            Self::Continue => "continue statement",
            Self::Panic => "panic statement",
            Self::Fail => "fail statement",
            Self::BinaryExpr => "binary expression",
            Self::UnaryExpr => "unary expression",
            Self::ConditionalExpr => "conditional expression",
            Self::TypeTestExpr => "type test expression",
            Self::TypeCastExpr => "type cast expression",
            Self::CheckExpr => "check expression",
            Self::TrapExpr => "trap expression",
            Self::TypeofExpr => "typeof expression",
            Self::BasicLiteral => "literal",
            Self::NilLiteral => "nil literal",
            Self::BracedExpr => "parenthesized expression",
            Self::ListCtor => "list constructor",
            Self::MappingCtor => "mapping constructor",
            Self::SpecificField => "specific field",
            Self::ComputedField => "computed field",
            Self::SpreadField => "spread field",
            Self::FuncCall => "function call",
            Self::MethodCall => "method call",
            Self::NamedArg => "named argument",
            Self::RestArg => "rest argument",
            Self::PositionalArg => "positional argument",
            Self::FieldAccess => "field access",
            Self::OptionalFieldAccess => "optional field access",
            Self::AnnotAccess => "annotation access",
            Self::IndexedExpr => "indexed expression",
            Self::TemplateExpr => "template expression",
            Self::Interpolation => "interpolation",
            Self::NewExpr => "new expression",
            Self::ErrorCtor => "error constructor",
            Self::XmlFilterExpr => "xml filter expression",
            Self::XmlStepExpr => "xml step expression",
            Self::XmlNamePattern => "xml name pattern",
            Self::ServiceDecl => "service declaration",
            Self::MatchStatement => "match statement",
            Self::MatchClause => "match clause",
            Self::MatchGuard => "match guard",
            Self::VarMatchPattern => "var match pattern",
            Self::ListMatchPattern => "list match pattern",
            Self::MappingMatchPattern => "mapping match pattern",
            Self::FieldMatchPattern => "field match pattern",
            Self::RestMatchPattern => "rest match pattern",
        }
    }

    /// Look up the keyword with the given text.
    pub fn keyword(text: &str) -> Option<Self> {
        Some(match text {
            "int" => Self::IntKw,
            "float" => Self::FloatKw,
            "string" => Self::StringKw,
            "boolean" => Self::BooleanKw,
            "decimal" => Self::DecimalKw,
            "xml" => Self::XmlKw,
            "json" => Self::JsonKw,
            "handle" => Self::HandleKw,
            "any" => Self::AnyKw,
            "anydata" => Self::AnydataKw,
            "never" => Self::NeverKw,
            "byte" => Self::ByteKw,
            "public" => Self::PublicKw,
            "private" => Self::PrivateKw,
            "function" => Self::FunctionKw,
            "return" => Self::ReturnKw,
            "returns" => Self::ReturnsKw,
            "external" => Self::ExternalKw,
            "type" => Self::TypeKw,
            "record" => Self::RecordKw,
            "object" => Self::ObjectKw,
            "remote" => Self::RemoteKw,
            "abstract" => Self::AbstractKw,
            "client" => Self::ClientKw,
            "if" => Self::IfKw,
            "else" => Self::ElseKw,
            "while" => Self::WhileKw,
            "true" => Self::TrueKw,
            "false" => Self::FalseKw,
            "check" => Self::CheckKw,
            "fail" => Self::FailKw,
            "checkpanic" => Self::CheckPanicKw,
            "continue" => Self::ContinueKw,
            "break" => Self::BreakKw,
            "panic" => Self::PanicKw,
            "import" => Self::ImportKw,
            "version" => Self::VersionKw,
            "as" => Self::AsKw,
            "service" => Self::ServiceKw,
            "on" => Self::OnKw,
            "resource" => Self::ResourceKw,
            "listener" => Self::ListenerKw,
            "const" => Self::ConstKw,
            "final" => Self::FinalKw,
            "typeof" => Self::TypeofKw,
            "is" => Self::IsKw,
            "null" => Self::NullKw,
            "lock" => Self::LockKw,
            "annotation" => Self::AnnotationKw,
            "source" => Self::SourceKw,
            "var" => Self::VarKw,
            "worker" => Self::WorkerKw,
            "parameter" => Self::ParameterKw,
            "field" => Self::FieldKw,
            "xmlns" => Self::XmlnsKw,
            "fork" => Self::ForkKw,
            "map" => Self::MapKw,
            "future" => Self::FutureKw,
            "typedesc" => Self::TypedescKw,
            "trap" => Self::TrapKw,
            "in" => Self::InKw,
            "foreach" => Self::ForeachKw,
            "table" => Self::TableKw,
            "error" => Self::ErrorKw,
            "let" => Self::LetKw,
            "stream" => Self::StreamKw,
            "new" => Self::NewKw,
            "readonly" => Self::ReadonlyKw,
            "distinct" => Self::DistinctKw,
            "from" => Self::FromKw,
            "where" => Self::WhereKw,
            "select" => Self::SelectKw,
            "start" => Self::StartKw,
            "flush" => Self::FlushKw,
            "default" => Self::DefaultKw,
            "wait" => Self::WaitKw,
            "do" => Self::DoKw,
            "transaction" => Self::TransactionKw,
            "commit" => Self::CommitKw,
            "retry" => Self::RetryKw,
            "rollback" => Self::RollbackKw,
            "transactional" => Self::TransactionalKw,
            "enum" => Self::EnumKw,
            "base16" => Self::Base16Kw,
            "base64" => Self::Base64Kw,
            "match" => Self::MatchKw,
            "conflict" => Self::ConflictKw,
            "limit" => Self::LimitKw,
            "join" => Self::JoinKw,
            "outer" => Self::OuterKw,
            "equals" => Self::EqualsKw,
            "order" => Self::OrderKw,
            "by" => Self::ByKw,
            "ascending" => Self::AscendingKw,
            "descending" => Self::DescendingKw,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_indexed() {
        assert!(SyntaxKind::COUNT > 256);
        for (i, kind) in SyntaxKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::keyword("function"), Some(SyntaxKind::FunctionKw));
        assert_eq!(SyntaxKind::keyword("checkpanic"), Some(SyntaxKind::CheckPanicKw));
        assert_eq!(SyntaxKind::keyword("descending"), Some(SyntaxKind::DescendingKw));
        assert_eq!(SyntaxKind::keyword("functions"), None);
        assert!(SyntaxKind::JsonKw.is_builtin_type());
        assert!(!SyntaxKind::PublicKw.is_builtin_type());
    }

    #[test]
    fn test_keyword_text_round_trips() {
        for text in ["int", "returns", "foreach", "base64", "ascending"] {
            let kind = SyntaxKind::keyword(text).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.text(), Some(text));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(SyntaxKind::OpenBrace.name(), "open brace");
        assert_eq!(SyntaxKind::Ident.name(), "identifier");
        assert!(SyntaxKind::Eof.is_token());
        assert!(!SyntaxKind::Block.is_token());
        assert!(SyntaxKind::Comment.is_trivia());
        assert!(SyntaxKind::CompilationUnit.is_node());
    }
}
