use crate::{
	parser::{
		expressions::{
			function_call::{FunctionCall, MethodCall},
			literals::{BooleanLiteral, NumberLiteral, StringLiteral},
			name::Name,
			operators::{BinaryExpression, UnaryExpression},
		},
		Parse, TokenQueue,
	},
	runtime::Evaluate,
};

/// The `function_call` module, which handles postfix call and method-call expressions.
pub mod function_call;
/// The `literals` module, which handles number, string, and boolean literal values.
pub mod literals;
/// The `name` module, which handles identifier references.
pub mod name;
/// The `operators` module, which handles binary and unary operator expressions.
pub mod operators;

/// An expression in the language. Note that unlike statements, expressions never introduce concurrency: blocks, parallel blocks, and loops live at the
/// statement layer, where they can be chained with `->`.
#[enum_dispatch::enum_dispatch(Evaluate)]
#[derive(Debug, Clone)]
pub enum Expression {
	/// A number literal.
	Number(NumberLiteral),
	/// A string literal.
	String(StringLiteral),
	/// A boolean literal, i.e. `true` or `false`.
	Boolean(BooleanLiteral),
	/// A reference to a named value.
	Name(Name),
	/// A function (or task unit constructor) call.
	FunctionCall(FunctionCall),
	/// A method call on a value, such as `group.next()`.
	MethodCall(MethodCall),
	/// A binary operation on two operands in infix notation.
	BinaryExpression(BinaryExpression),
	/// A prefix operation on a single operand.
	UnaryExpression(UnaryExpression),
}

impl Parse for Expression {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		BinaryExpression::parse(tokens)
	}
}

impl Expression {
	/// The label a `@timed` annotation derives when its target is this expression used as a statement: the callee name for a call to a named function, the
	/// method name for a method call, and the generic "expr" otherwise.
	pub(crate) fn call_label(&self) -> String {
		match self {
			Self::FunctionCall(function_call) => {
				if let Self::Name(name) = function_call.function.as_ref() {
					name.as_str().to_owned()
				} else {
					"expr".to_owned()
				}
			},
			Self::MethodCall(method_call) => method_call.name.clone(),
			_ => "expr".to_owned(),
		}
	}
}
