//! CSS text output and declaration-block parsing.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState, QualifiedRuleParser,
    RuleBodyItemParser, RuleBodyParser, Token,
};

use super::StyleGroup;

/// Flat, pasteable CSS: one `property: value` per line joined by `;\n`.
///
/// Group order, then insertion order within each group.
pub fn to_css_text(groups: &[StyleGroup]) -> String {
    groups
        .iter()
        .flat_map(|g| g.styles.iter())
        .map(|(property, value)| format!("{}: {}", property, value))
        .collect::<Vec<_>>()
        .join(";\n")
}

/// CSS with a `/* Group */` comment above each non-empty group.
pub fn to_css_text_grouped(groups: &[StyleGroup]) -> String {
    let mut blocks = Vec::new();
    for group in groups.iter().filter(|g| !g.styles.is_empty()) {
        let mut block = format!("/* {} */\n", group.name);
        for (property, value) in group.styles.iter() {
            block.push_str(&format!("{}: {};\n", property, value));
        }
        blocks.push(block);
    }
    blocks.join("\n").trim_end().to_string()
}

/// One parsed `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssDeclaration {
    pub property: String,
    pub value: String,
}

impl CssDeclaration {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse a declaration block as typed or pasted by a user.
///
/// Accepts values spanning several lines, a missing final semicolon, and
/// `/* */` or `//` comments. Semicolons inside parentheses or quotes do not
/// split declarations. Entries without a property or value are dropped.
pub fn parse_declarations(css_text: &str) -> Vec<CssDeclaration> {
    // `//` lines are not CSS, drop them before tokenizing.
    let text = css_text
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut input = ParserInput::new(&text);
    let mut parser = Parser::new(&mut input);
    let mut body = DeclarationBody;
    let declarations: Vec<CssDeclaration> = RuleBodyParser::new(&mut parser, &mut body).flatten().collect();
    declarations
}

/// Accepts plain declarations only; nested rules and at-rules are skipped.
struct DeclarationBody;

impl<'i> DeclarationParser<'i> for DeclarationBody {
    type Declaration = CssDeclaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let mut raw = String::new();
        push_value_text(input, &mut raw);
        let value = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(CssDeclaration::new(&name, &value))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationBody {
    type Prelude = ();
    type AtRule = CssDeclaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationBody {
    type Prelude = ();
    type QualifiedRule = CssDeclaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, CssDeclaration, ()> for DeclarationBody {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Copy the source text of the remaining tokens into `out`, replacing
/// comments with a space.
fn push_value_text(input: &mut Parser<'_, '_>, out: &mut String) {
    loop {
        let start = input.position();
        let opens_block = match input.next_including_whitespace_and_comments() {
            Ok(Token::Comment(_)) => {
                out.push(' ');
                continue;
            }
            Ok(Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock) => {
                true
            }
            Ok(_) => false,
            Err(_) => break,
        };
        out.push_str(input.slice_from(start));
        if opens_block {
            let block_end: Result<_, ParseError<'_, ()>> = input.parse_nested_block(|block| {
                push_value_text(block, out);
                Ok(block.position())
            });
            // Appends the closing delimiter, absent for an unterminated block.
            if let Ok(end) = block_end {
                out.push_str(input.slice_from(end));
            }
        }
    }
}
