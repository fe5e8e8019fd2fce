use std::collections::VecDeque;

// Bring the `Casing` trait into scope, which allows us to use `.to_case()` on strings. This is used to convert `TokenType` enum variant names into Title Case,
// which is useful for outputting human-readable errors. We assign this to `as _` to indicate clearly that the trait is not referenced directly and only used
// to bring its methods into scope to be called.
use convert_case::Casing as _;
// Bring the `IntoEnumIterator` trait into scope, which allows us to use `::iter()` on enums that `#[derive(strum_macros::EnumIter)]`. Specifically here, this is used
// on `TokenType` to iterate over the values of the enum to test which one matches a specific string of DICE code.
use strum::IntoEnumIterator as _;

/// A type of token in DICE source code. The first step in running a DICE program is tokenization, which is the process of splitting a raw string of source
/// code into "tokens" which each have a "type" representing the kind of token it is, and a "value" representing the string of source code that is associated
/// with it. This enum defines the different "types" of tokens. Tokens themselves are stored in a separate `Token` struct, which has a `token_type: TokenType`
/// field, so that the token types stay iterable as concrete objects.
///
/// # Conventions
///
/// These token types are named by what the token itself appears as, not its usage in the language. For example, the "`@`" token is not called "annotation",
/// it is just called `At`. The names should be parser-agnostic, meaning they have no "knowledge" of the actual use cases of the token in the language.
///
/// Token types are matched in the order they are declared here, so ordering is load-bearing in two places: every keyword must be declared *before*
/// `Identifier` (or it would be tokenized as an identifier), and every multi-character operator must be declared *before* the operators that are a prefix of
/// it (`->` before `-`, `==` before `=`, `..` before `.`, and so on). Please be careful when moving variants around.
#[derive(strum_macros::EnumIter, PartialEq, Eq, Debug, Clone)]
pub enum TokenType {
	/// The `func` keyword token type. This is used to declare functions.
	///
	/// Like all keywords, this enum variant declaration *must* come before `Identifier`.
	KeywordFunction,

	/// The `taskunit` keyword token type. This is used to declare task units: class-like definitions whose zero-argument `step1`, `step2`, ... methods are
	/// run in lockstep by `parallelTasks` groups.
	KeywordTaskUnit,

	/// The `if` keyword token type.
	KeywordIf,

	/// The `else` keyword token type. This runs a block of code when an `if` condition is false.
	KeywordElse,

	/// The `loop` keyword token type. This is used for sequential range loops, and, combined with `p`/`parallel`, for parallel range loops.
	KeywordLoop,

	/// The `in` keyword token type, separating a loop variable from its range.
	KeywordIn,

	/// The `parallel` keyword token type. This introduces a parallel block or a parallel loop. `p` is a synonym.
	KeywordParallel,

	/// The `p` keyword token type; A shorthand synonym for `parallel`.
	///
	/// The word-boundary in this keyword's pattern is what stops identifiers starting with "p" (like `print`) from being split at their first character;
	/// Still, like all keywords, this variant must be declared before `Identifier`.
	KeywordP,

	/// The `true` keyword token type; The truthful boolean literal.
	KeywordTrue,

	/// The `false` keyword token type; The untruthful boolean literal.
	KeywordFalse,

	/// The "line comment" token type. Comments start with `//` and continue until the end of the line. Tokens of this type are detected by the lexer and
	/// then discarded, along with whitespace; The parser never sees them.
	///
	/// NOTE: This *must* be checked ***before*** the `ForwardSlash` token type. Failure to do so will start tokenizing a comment as two separate forward
	/// slash tokens, and then attempt to parse the comment as code.
	LineComment,

	/// The arrow token type (`->`). This is the sequencing operator, which chains statement units so that the right unit starts only after the left unit
	/// (including all of its parallel branches) has completed.
	///
	/// This *must* be declared before `Minus`, of which it is a superstring.
	Arrow,

	/// The double equals token type (`==`), used for equality comparisons. This *must* be declared before `Equal`.
	DoubleEquals,

	/// The not-equals token type (`!=`). This *must* be declared before `Bang`.
	NotEquals,

	/// The less-than-or-equal token type (`<=`). This *must* be declared before `LessThan`.
	LessThanOrEqual,

	/// The greater-than-or-equal token type (`>=`). This *must* be declared before `GreaterThan`.
	GreaterThanOrEqual,

	/// The double ampersand token type (`&&`), the short-circuiting logical "and" operator. There is no single-ampersand token in the language.
	DoubleAmpersand,

	/// The double pipe token type (`||`), the short-circuiting logical "or" operator. There is no single-pipe token in the language.
	DoublePipe,

	/// The double dot token type (`..`), which separates the two bounds of a loop range. This *must* be declared before `Dot`.
	DotDot,

	/// The "equal" token type, used for assignment. Any token tokenized of this type will always have a single-character value, which is the "equal"
	/// character (=).
	Equal,

	/// The "plus" token type. This is used for parsing arithmetic addition expressions and string concatenation.
	Plus,

	/// The "minus" token type, used for subtraction and unary negation.
	Minus,

	/// The "asterisk" token type. This is used for parsing arithmetic multiplication expressions.
	Asterisk,

	/// The forward slash token, used for arithmetic division expressions. Declared after `LineComment`; See the note there.
	ForwardSlash,

	/// The less-than token type (`<`).
	LessThan,

	/// The greater-than token type (`>`).
	GreaterThan,

	/// The "bang" token type (`!`), the logical "not" operator.
	Bang,

	/// The "dot" token type, used for method access such as `group.next()`.
	Dot,

	/// The "at" token type (`@`), the annotation sigil. Currently the only annotation in the language is `@timed`; The word `timed` itself is tokenized as a
	/// plain identifier following this sigil.
	At,

	/// The left brace token type. This should *always* come some amount of tokens before a `RightBrace` token; There is no syntax in DICE that constitutes
	/// unmatched braces.
	LeftBrace,

	/// The right brace token type.
	RightBrace,

	/// The left parenthesis token type. This is used for things like parenthesized expressions, function calls, parameter lists, etc.
	LeftParenthesis,

	/// The right parenthesis token type.
	RightParenthesis,

	/// The "comma" token type. This is used for function parameter separation and call argument separation.
	Comma,

	/// The semicolon token type. Statements may be terminated with a semicolon, and the parser discards it; A missing semicolon is legal at the end of a
	/// block.
	Semicolon,

	/// The string token type. This is a double quoted string with `\"` and `\\` escapes and no interpolation. The double quotes of the string are both
	/// included in the returned token, and escape sequences are kept exactly as written; The parser is responsible for unescaping.
	String,

	/// The number token type. DICE only supports plain decimal literals matching `/\d+(\.\d+)?/`. Negative numbers are parsed as unary negation applied to a
	/// number literal, not as part of the literal itself.
	Number,

	/// An identifier in the language; A "name" of a variable, function, task unit, or method.
	///
	/// Note that the token types are all checked in the order they are declared. The `Identifier` pattern **does not** take special care to not include
	/// keywords, so this variant declaration must occur *after* all keywords in the language.
	Identifier,

	/// The whitespace token type. This is a special token type because it is detected by the lexer, but tokens of this type are not added to the token list;
	/// The parser never sees them. This constitutes all standard ASCII whitespace, including carriage returns, so both LF and CRLF sources are accepted.
	Whitespace,
}

impl TokenType {
	/// Returns a regular expression pattern that matches the token type. This specifically checks if the given string *starts* with the token type.
	/// The returned value is a lazily-evaluated static, so there is no performance loss to calling this repeatedly.
	fn pattern(&self) -> &'static regex_macro::Regex {
		match self {
			// Keywords
			Self::KeywordFunction => regex_macro::regex!(r"^func\b"),
			Self::KeywordTaskUnit => regex_macro::regex!(r"^taskunit\b"),
			Self::KeywordIf => regex_macro::regex!(r"^if\b"),
			Self::KeywordElse => regex_macro::regex!(r"^else\b"),
			Self::KeywordLoop => regex_macro::regex!(r"^loop\b"),
			Self::KeywordIn => regex_macro::regex!(r"^in\b"),
			Self::KeywordParallel => regex_macro::regex!(r"^parallel\b"),
			Self::KeywordP => regex_macro::regex!(r"^p\b"),
			Self::KeywordTrue => regex_macro::regex!(r"^true\b"),
			Self::KeywordFalse => regex_macro::regex!(r"^false\b"),

			// Multi-character operators; Each must precede its single-character prefix
			Self::Arrow => regex_macro::regex!("^->"),
			Self::DoubleEquals => regex_macro::regex!("^=="),
			Self::NotEquals => regex_macro::regex!("^!="),
			Self::LessThanOrEqual => regex_macro::regex!("^<="),
			Self::GreaterThanOrEqual => regex_macro::regex!("^>="),
			Self::DoubleAmpersand => regex_macro::regex!("^&&"),
			Self::DoublePipe => regex_macro::regex!(r"^\|\|"),
			Self::DotDot => regex_macro::regex!(r"^\.\."),

			// Single-character operators
			Self::Equal => regex_macro::regex!("^="),
			Self::Plus => regex_macro::regex!(r"^\+"),
			Self::Minus => regex_macro::regex!("^-"),
			Self::Asterisk => regex_macro::regex!(r"^\*"),
			Self::ForwardSlash => regex_macro::regex!("^/"),
			Self::LessThan => regex_macro::regex!("^<"),
			Self::GreaterThan => regex_macro::regex!("^>"),
			Self::Bang => regex_macro::regex!("^!"),
			Self::Dot => regex_macro::regex!(r"^\."),
			Self::At => regex_macro::regex!("^@"),

			// Groupings and punctuation
			Self::LeftBrace => regex_macro::regex!(r"^\{"),
			Self::RightBrace => regex_macro::regex!(r"^\}"),
			Self::LeftParenthesis => regex_macro::regex!(r"^\("),
			Self::RightParenthesis => regex_macro::regex!(r"^\)"),
			Self::Comma => regex_macro::regex!("^,"),
			Self::Semicolon => regex_macro::regex!("^;"),

			// Literals
			Self::String => regex_macro::regex!(r#"^"(\\.|[^"\\\n])*""#),
			Self::Number => regex_macro::regex!(r"^\d+(\.\d+)?"),
			Self::Identifier => regex_macro::regex!(r"^[a-zA-Z_]\w*"),

			// Ignored tokens
			Self::Whitespace => regex_macro::regex!(r"^\s"),
			Self::LineComment => regex_macro::regex!(r"^//[^\n\r]*"),
		}
	}

	/// Returns the matched text of the token type in the given code. This only returns `Some` if there is a match *at the start* of the string to this
	/// token type. Even if this token type exists in the given code, but occurs later than the start, this will return `None`.
	#[must_use]
	pub fn get_match(&self, code: &str) -> Option<String> {
		self.pattern().find(code).map(|token_match| token_match.as_str().to_owned())
	}

	/// Finds the first token type that matches the given code, along with the matched text. Token types are tried in declaration order.
	#[must_use]
	fn find_match(code: &str) -> Option<(Self, String)> {
		for token_type in Self::iter() {
			if let Some(matched) = token_type.get_match(code) {
				return Some((token_type, matched));
			}
		}
		None
	}
}

impl std::fmt::Display for TokenType {
	fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "{}", format!("{self:?}").to_case(convert_case::Case::Title))
	}
}

/// A token in source code.
#[derive(Debug, Clone)]
pub struct Token {
	/// The type of the token.
	pub token_type: TokenType,
	/// The value of the token. This value is how the token originally appears in the source code *exactly*; For example, strings retain their quotes and
	/// escape sequences in this field.
	pub value: String,
	/// The line number of the token, 1-based, as it appears in the source code passed to `tokenize`.
	pub line: usize,
	/// The column number of the token, 1-based.
	pub column: usize,
}

/// Tokenizes a string of DICE source code into a queue of tokens. This is the first step in running a DICE program. The returned queue of tokens should be
/// passed into the parser, which will convert it into an abstract syntax tree.
///
/// # Parameters
/// - `code` - The DICE source code. It needn't be semantically or even grammatically valid, but it must be comprised of the proper tokens.
///
/// # Returns
/// The tokens in the order they appeared in the given source code, or an `Err` naming the line and column of the first unrecognized character or
/// unterminated string.
pub fn tokenize(code: &str) -> anyhow::Result<VecDeque<Token>> {
	let mut code = code.replace('\t', "    ");

	let mut tokens = Vec::new();
	let mut line = 1;
	let mut column = 1;

	// We only read tokens from the start of a string, so we repeatedly loop over the code and remove the tokenized text when we find tokens.
	// This means we can just iterate while code isn't empty.
	while !code.is_empty() {
		// We've got a match - we found a token that matches the start of the code
		if let Some((token_type, value)) = TokenType::find_match(&code) {
			let length = value.len(); // This must be done early so that we aren't trying to get the length of a moved value
			let width = value.chars().count();
			let newline_count = value.chars().filter(|character| *character == '\n').count();

			// Add the token - ignore whitespace and comments!
			if token_type != TokenType::Whitespace && token_type != TokenType::LineComment {
				tokens.push(Token { token_type, value, line, column });
			}
			// If it is whitespace, add to the newlines!
			else {
				line += newline_count;
			}

			// Update the column and the code so that the code cuts off the bit we just tokenized
			column = if newline_count > 0 { 1 } else { column + width };
			code = code.split_off(length);
		}
		// A lone double quote means the string it opened never closed on its line
		else if code.starts_with('"') {
			anyhow::bail!("lex error at {line}:{column}: unterminated string literal");
		}
		// Unrecognized character - return an error!
		else {
			anyhow::bail!(
				"lex error at {line}:{column}: unrecognized character: {character}",
				character = code.chars().next().unwrap_or_default()
			);
		}
	}

	// We'll only get here if we didn't get any errors, so we can just return the tokens wrapped in an `Ok`
	Ok(VecDeque::from(tokens))
}
