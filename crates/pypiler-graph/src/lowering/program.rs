//! Function-level lowering and registry installation.

use pypiler_core::{Construct, Error, Result};
use pypiler_syntax::{FunctionRef, NodeKind, SourceLocator, SourceParser, SyntaxNode, SyntaxTree};

use crate::lowering::core::{GraphLowering, LoweringResult, graph_error};
use crate::lowering::helpers::{required, unsupported, unsupported_expression};
use crate::Operator;

impl GraphLowering<'_> {
    /// Fetches, parses and lowers one function, installing the resulting
    /// operator in the registry under the function's name.
    ///
    /// # Errors
    /// Returns an error if the source cannot be located or parsed, if it
    /// does not hold exactly one function definition, or if the body uses
    /// anything outside the supported subset.
    pub fn lower_function(
        &mut self,
        locator: &dyn SourceLocator,
        parser: &dyn SourceParser,
        function: &FunctionRef,
    ) -> Result<&Operator> {
        let source = locator.source_of(function)?;
        let tree = parser.parse(&source)?;

        let mut definitions = tree.functions();
        let definition = definitions.next().ok_or_else(|| {
            Error::Locate(format!("source of `{function}` holds no function definition"))
        })?;
        if definitions.next().is_some() {
            return Err(Error::Locate(format!(
                "source of `{function}` holds more than one function definition"
            )));
        }

        self.lower_definition(definition)
    }

    /// Lowers every top-level function of a module, in source order.
    ///
    /// Stops at the first function that fails; functions lowered before it
    /// stay installed. Returns the names of the lowered operators.
    ///
    /// # Errors
    /// Returns an error if the module does not parse or a function fails
    /// to lower.
    pub fn lower_source(
        &mut self,
        parser: &dyn SourceParser,
        source: &str,
    ) -> Result<Vec<String>> {
        let tree = parser.parse(source)?;
        self.lower_tree(&tree)
    }

    /// Lowers every top-level function of a parsed module, in source order.
    ///
    /// # Errors
    /// Returns an error if a function fails to lower.
    pub fn lower_tree(&mut self, tree: &SyntaxTree) -> Result<Vec<String>> {
        tree.functions()
            .map(|definition| {
                self.lower_definition(definition)
                    .map(|operator| operator.name().to_string())
            })
            .collect()
    }

    /// Lowers a parsed function definition and installs it.
    ///
    /// # Errors
    /// Returns [`Error::Lowering`] if the definition is rejected.
    pub fn lower_definition(&mut self, definition: &SyntaxNode) -> Result<&Operator> {
        let operator = self.build_operator(definition)?;
        tracing::debug!(
            operator = operator.name(),
            operations = operator.operations().count(),
            carriers = operator.carriers().count(),
            "lowered function"
        );

        self.registry
            .install(operator)
            .map_err(|e| Error::from(graph_error(e, definition.span)))
    }

    fn build_operator(&mut self, definition: &SyntaxNode) -> LoweringResult<Operator> {
        match definition.kind {
            NodeKind::FunctionDefinition => {}
            NodeKind::DecoratedDefinition => {
                return Err(unsupported(Construct::Decorator, definition));
            }
            _ => return Err(unsupported_expression(definition)),
        }
        if definition.has_token("async") {
            return Err(unsupported(Construct::AsyncFunction, definition));
        }
        if let Some(annotation) = definition.child_by_field("return_type") {
            return Err(unsupported(Construct::ReturnAnnotation, annotation));
        }

        let name = required(definition, "name")?;
        self.registry
            .check_redefinition(&name.text)
            .map_err(|e| graph_error(e, name.span))?;
        // recursive calls resolve against this entry
        self.registry.declare_or_get(&name.text);

        tracing::debug!(function = %name.text, "lowering function");
        let mut operator = Operator::new(name.text.clone());
        self.lower_parameters(&mut operator, required(definition, "parameters")?)?;
        self.lower_block(&mut operator, required(definition, "body")?)?;
        Ok(operator)
    }

    /// Binds each plain parameter to a same-named output of the boundary.
    fn lower_parameters(
        &mut self,
        operator: &mut Operator,
        parameters: &SyntaxNode,
    ) -> LoweringResult<()> {
        let boundary = operator.boundary_id();
        for parameter in parameters.named_children() {
            let construct = match parameter.kind {
                NodeKind::Identifier => {
                    let carrier = operator
                        .add_carrier(parameter.text.clone())
                        .map_err(|e| graph_error(e, parameter.span))?;
                    operator
                        .bind_output(boundary, carrier, parameter.text.clone())
                        .map_err(|e| graph_error(e, parameter.span))?;
                    continue;
                }
                NodeKind::TypedParameter | NodeKind::TypedDefaultParameter => {
                    Construct::TypedParameter
                }
                NodeKind::DefaultParameter => Construct::DefaultParameter,
                NodeKind::ListSplatPattern => Construct::VariadicParameter,
                NodeKind::DictionarySplatPattern => Construct::KeywordVariadicParameter,
                NodeKind::KeywordSeparator | NodeKind::PositionalSeparator => {
                    Construct::ParameterSeparator
                }
                _ => return Err(unsupported_expression(parameter)),
            };
            return Err(unsupported(construct, parameter));
        }
        Ok(())
    }
}
