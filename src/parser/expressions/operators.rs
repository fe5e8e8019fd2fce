use std::sync::Arc;

use colored::Colorize as _;

use crate::{
	lexer::TokenType,
	parser::{
		expressions::{
			function_call::PostfixOperators,
			literals::{BooleanLiteral, NumberLiteral, StringLiteral},
			name::Name,
			Expression,
		},
		Parse, TokenQueue, TokenQueueFunctionality as _,
	},
	runtime::{scope::Scope, value::Value, Evaluate},
};

/// A binary operation. More specifically, this represents not one operation, but a group of operations that share the same precedence.
/// For example, the `+` and `-` operators share the same precedence, so they are grouped together in the `ADDITIVE` constant.
struct BinaryOperation<'this> {
	/// The operation that has the next highest precedence, or `None` if this operation has the highest precedence.
	precedent: Option<&'this BinaryOperation<'this>>,
	/// The token types that represent this operation, used to parse a binary expression.
	token_types: &'this [TokenType],
}

/// The multiplicative operations, which have the highest binary precedence. This covers the `*` and `/` operators.
static MULTIPLICATIVE: BinaryOperation<'static> = BinaryOperation {
	precedent: None,
	token_types: &[TokenType::Asterisk, TokenType::ForwardSlash],
};

/// The additive operations. This covers the `+` and `-` operators.
static ADDITIVE: BinaryOperation<'static> = BinaryOperation {
	precedent: Some(&MULTIPLICATIVE),
	token_types: &[TokenType::Plus, TokenType::Minus],
};

/// The comparison operations: `<`, `<=`, `>`, and `>=`.
static COMPARISON: BinaryOperation<'static> = BinaryOperation {
	precedent: Some(&ADDITIVE),
	token_types: &[TokenType::LessThanOrEqual, TokenType::LessThan, TokenType::GreaterThanOrEqual, TokenType::GreaterThan],
};

/// The equality operations: `==` and `!=`.
static EQUALITY: BinaryOperation<'static> = BinaryOperation {
	precedent: Some(&COMPARISON),
	token_types: &[TokenType::DoubleEquals, TokenType::NotEquals],
};

/// The logical "and" operation (`&&`), which binds tighter than `||` but looser than equality.
static LOGICAL_AND: BinaryOperation<'static> = BinaryOperation {
	precedent: Some(&EQUALITY),
	token_types: &[TokenType::DoubleAmpersand],
};

/// The logical "or" operation (`||`), which has the lowest precedence of all binary operations.
static LOGICAL_OR: BinaryOperation<'static> = BinaryOperation {
	precedent: Some(&LOGICAL_AND),
	token_types: &[TokenType::DoublePipe],
};

impl BinaryOperation<'_> {
	/// Parses the precedent operation of this one if it exists; Otherwise, parses a unary expression (which binds tighter than any binary operation).
	fn parse_precedent(&self, tokens: &mut TokenQueue) -> anyhow::Result<Expression> {
		if let Some(precedent) = self.precedent {
			parse_binary_expression(precedent, tokens)
		} else {
			UnaryExpression::parse(tokens)
		}
	}
}

/// The operator of a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
	/// The `+` operator: addition on numbers, concatenation on strings.
	Add,
	/// The `-` operator on numbers.
	Subtract,
	/// The `*` operator on numbers.
	Multiply,
	/// The `/` operator on numbers.
	Divide,
	/// The `==` operator; Value equality on primitives and identity on functions, task instances, and task groups.
	Equals,
	/// The `!=` operator; The negation of `==`.
	NotEquals,
	/// The `<` operator on numbers.
	LessThan,
	/// The `<=` operator on numbers.
	LessThanOrEqual,
	/// The `>` operator on numbers.
	GreaterThan,
	/// The `>=` operator on numbers.
	GreaterThanOrEqual,
	/// The `&&` operator on booleans. The right operand is not evaluated when the left operand is `false`.
	And,
	/// The `||` operator on booleans. The right operand is not evaluated when the left operand is `true`.
	Or,
}

impl BinaryOperator {
	/// The operator as written in source code, used in error messages.
	fn symbol(self) -> &'static str {
		match self {
			Self::Add => "+",
			Self::Subtract => "-",
			Self::Multiply => "*",
			Self::Divide => "/",
			Self::Equals => "==",
			Self::NotEquals => "!=",
			Self::LessThan => "<",
			Self::LessThanOrEqual => "<=",
			Self::GreaterThan => ">",
			Self::GreaterThanOrEqual => ">=",
			Self::And => "&&",
			Self::Or => "||",
		}
	}

	/// The binary operator that the given token type spells, used while parsing a binary expression. The given token type must be one listed in one of the
	/// `BinaryOperation` precedence groups.
	fn from_token_type(token_type: &TokenType) -> Self {
		match token_type {
			TokenType::Plus => Self::Add,
			TokenType::Minus => Self::Subtract,
			TokenType::Asterisk => Self::Multiply,
			TokenType::ForwardSlash => Self::Divide,
			TokenType::DoubleEquals => Self::Equals,
			TokenType::NotEquals => Self::NotEquals,
			TokenType::LessThan => Self::LessThan,
			TokenType::LessThanOrEqual => Self::LessThanOrEqual,
			TokenType::GreaterThan => Self::GreaterThan,
			TokenType::GreaterThanOrEqual => Self::GreaterThanOrEqual,
			TokenType::DoubleAmpersand => Self::And,
			TokenType::DoublePipe => Self::Or,
			_ => unreachable!(),
		}
	}
}

/// A binary expression node in the abstract syntax tree. This represents an operation that takes two operands in infix notation.
#[derive(Debug, Clone)]
pub struct BinaryExpression {
	/// The operator of the expression.
	pub operator: BinaryOperator,
	/// The left-hand operand.
	pub left: Box<Expression>,
	/// The right-hand operand.
	pub right: Box<Expression>,
}

fn parse_binary_expression(operation: &BinaryOperation<'_>, tokens: &mut TokenQueue) -> anyhow::Result<Expression> {
	let mut expression = operation.parse_precedent(tokens)?;
	while tokens.next_is_one_of(operation.token_types) {
		let operator_type = tokens.peek_type()?.clone();
		tokens.pop(operator_type.clone())?;
		let operator = BinaryOperator::from_token_type(&operator_type);
		let right = operation.parse_precedent(tokens)?;
		expression = Expression::BinaryExpression(BinaryExpression {
			operator,
			left: Box::new(expression),
			right: Box::new(right),
		});
	}

	Ok(expression)
}

impl Parse for BinaryExpression {
	type Output = Expression;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		parse_binary_expression(&LOGICAL_OR, tokens)
	}
}

impl Evaluate for BinaryExpression {
	fn evaluate(&self, scope: &Arc<Scope>) -> anyhow::Result<Value> {
		// The logical operators short-circuit, so they get to decide whether the right operand is evaluated at all.
		if let BinaryOperator::And | BinaryOperator::Or = self.operator {
			let left = expect_boolean(self.left.evaluate(scope)?, self.operator)?;
			let decided = match self.operator {
				BinaryOperator::And => !left,
				_ => left,
			};
			if decided {
				return Ok(Value::Boolean(left));
			}
			return Ok(Value::Boolean(expect_boolean(self.right.evaluate(scope)?, self.operator)?));
		}

		let left = self.left.evaluate(scope)?;
		let right = self.right.evaluate(scope)?;
		Ok(match self.operator {
			BinaryOperator::Add => match (left, right) {
				(Value::Number(left), Value::Number(right)) => Value::Number(left + right),
				(Value::String(left), Value::String(right)) => Value::String(left + &right),
				(left, right) => anyhow::bail!(
					"runtime error: cannot add {} to {}",
					left.type_name().bold().cyan(),
					right.type_name().bold().cyan()
				),
			},
			BinaryOperator::Subtract => Value::Number(expect_number(left, self.operator)? - expect_number(right, self.operator)?),
			BinaryOperator::Multiply => Value::Number(expect_number(left, self.operator)? * expect_number(right, self.operator)?),
			BinaryOperator::Divide => Value::Number(expect_number(left, self.operator)? / expect_number(right, self.operator)?),
			BinaryOperator::Equals => Value::Boolean(left == right),
			BinaryOperator::NotEquals => Value::Boolean(left != right),
			BinaryOperator::LessThan => Value::Boolean(expect_number(left, self.operator)? < expect_number(right, self.operator)?),
			BinaryOperator::LessThanOrEqual => Value::Boolean(expect_number(left, self.operator)? <= expect_number(right, self.operator)?),
			BinaryOperator::GreaterThan => Value::Boolean(expect_number(left, self.operator)? > expect_number(right, self.operator)?),
			BinaryOperator::GreaterThanOrEqual => Value::Boolean(expect_number(left, self.operator)? >= expect_number(right, self.operator)?),
			BinaryOperator::And | BinaryOperator::Or => unreachable!(),
		})
	}
}

/// A prefix operation on a single operand: logical "not" on a boolean, or negation on a number.
#[derive(Debug, Clone)]
pub struct UnaryExpression {
	/// The operator of the expression.
	pub operator: UnaryOperator,
	/// The operand the operator applies to.
	pub operand: Box<Expression>,
}

/// The operator of a unary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
	/// The `!` operator on booleans.
	Not,
	/// The `-` operator on numbers.
	Negate,
}

impl Parse for UnaryExpression {
	type Output = Expression;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		let operator = if tokens.next_is(TokenType::Bang) {
			tokens.pop(TokenType::Bang)?;
			UnaryOperator::Not
		} else if tokens.next_is(TokenType::Minus) {
			tokens.pop(TokenType::Minus)?;
			UnaryOperator::Negate
		} else {
			return PostfixOperators::parse(tokens);
		};

		// Unary operators nest, so `!!x` and `--x` parse as applications of the operator to another unary expression.
		Ok(Expression::UnaryExpression(Self {
			operator,
			operand: Box::new(Self::parse(tokens)?),
		}))
	}
}

impl Evaluate for UnaryExpression {
	fn evaluate(&self, scope: &Arc<Scope>) -> anyhow::Result<Value> {
		let operand = self.operand.evaluate(scope)?;
		Ok(match self.operator {
			UnaryOperator::Not => match operand {
				Value::Boolean(value) => Value::Boolean(!value),
				other => anyhow::bail!("runtime error: ! requires a Boolean, but got {}", other.type_name().bold().cyan()),
			},
			UnaryOperator::Negate => match operand {
				Value::Number(value) => Value::Number(-value),
				other => anyhow::bail!("runtime error: unary - requires a Number, but got {}", other.type_name().bold().cyan()),
			},
		})
	}
}

/// A primary expression: a literal, a name, or a parenthesized expression.
pub struct PrimaryExpression;

impl Parse for PrimaryExpression {
	type Output = Expression;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		Ok(match tokens.peek_type()? {
			TokenType::LeftParenthesis => {
				tokens.pop(TokenType::LeftParenthesis).unwrap_or_else(|_| unreachable!());
				let expression = Expression::parse(tokens)?;
				tokens.pop(TokenType::RightParenthesis)?;
				expression
			},
			TokenType::Number => Expression::Number(NumberLiteral::parse(tokens)?),
			TokenType::String => Expression::String(StringLiteral::parse(tokens)?),
			TokenType::KeywordTrue | TokenType::KeywordFalse => Expression::Boolean(BooleanLiteral::parse(tokens)?),
			TokenType::Identifier => Expression::Name(Name::parse(tokens)?),
			other => {
				let token = tokens.peek().unwrap_or_else(|| unreachable!());
				anyhow::bail!(
					"parse error at {}:{}: expected an expression, but found {}",
					token.line,
					token.column,
					format!("{other}").bold().cyan()
				);
			},
		})
	}
}

fn expect_number(value: Value, operator: BinaryOperator) -> anyhow::Result<f64> {
	match value {
		Value::Number(number) => Ok(number),
		other => anyhow::bail!(
			"runtime error: {} requires Numbers, but got {}",
			operator.symbol().bold(),
			other.type_name().bold().cyan()
		),
	}
}

fn expect_boolean(value: Value, operator: BinaryOperator) -> anyhow::Result<bool> {
	match value {
		Value::Boolean(boolean) => Ok(boolean),
		other => anyhow::bail!(
			"runtime error: {} requires Booleans, but got {}",
			operator.symbol().bold(),
			other.type_name().bold().cyan()
		),
	}
}
