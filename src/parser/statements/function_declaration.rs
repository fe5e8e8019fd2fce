use std::sync::Arc;

use crate::{
	lexer::TokenType,
	parse_list,
	parser::{statements::block::Block, Parse, TokenQueue, TokenQueueFunctionality as _},
	runtime::{
		scope::Scope,
		value::{DeclaredFunction, Function, Value},
		Execute,
	},
};

/// A `func` declaration. Executing the declaration binds a function value in the current scope; The function captures its defining environment, so calling
/// it later resolves free names lexically, not dynamically.
#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
	/// The name of the function.
	pub name: String,
	/// The parameter names, in declaration order. Arguments are bound to them positionally at call time.
	pub parameters: Vec<String>,
	/// The body of the function. This is behind an `Arc` so that function values can keep the body alive without cloning the subtree.
	pub body: Arc<Block>,
}

impl Parse for FunctionDeclaration {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		tokens.pop(TokenType::KeywordFunction)?;
		let name = tokens.pop(TokenType::Identifier)?;
		let mut parameters = Vec::new();
		parse_list!(tokens, {
			parameters.push(tokens.pop(TokenType::Identifier)?);
		});
		let body = Arc::new(Block::parse(tokens)?);
		Ok(Self { name, parameters, body })
	}
}

impl FunctionDeclaration {
	/// Binds this function in the given scope, optionally with a `@timed` label. When a label is present, every invocation of the function is timed and
	/// reported individually.
	pub(crate) fn declare_with_label(&self, scope: &Arc<Scope>, timed_label: Option<String>) {
		scope.declare(
			&self.name,
			Value::Function(Function::Declared(Arc::new(DeclaredFunction {
				name: self.name.clone(),
				parameters: self.parameters.clone(),
				body: Arc::clone(&self.body),
				environment: Arc::clone(scope),
				timed_label,
			}))),
		);
	}
}

impl Execute for FunctionDeclaration {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		self.declare_with_label(scope, None);
		Ok(())
	}
}
