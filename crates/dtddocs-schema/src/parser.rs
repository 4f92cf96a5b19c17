//! DTD declaration parser.
//!
//! Parses the declarations of a DTD (internal-subset syntax) into a
//! [`Dtd`]: `<!ELEMENT>` content models become [`ContentParticle`] trees,
//! `<!ATTLIST>` blocks become [`AttributeSpec`] lists, and internal
//! parameter entities are expanded in place. Comments, processing
//! instructions, `<!NOTATION>` declarations and general entities are
//! consumed and ignored; `INCLUDE`/`IGNORE` conditional sections are
//! honored.
//!
//! Element order in the result is `<!ELEMENT>` declaration order, which
//! downstream consumers treat as schema-declaration order.

use std::collections::HashMap;

use crate::attribute::{AttributeDefault, AttributeSpec, AttributeType};
use crate::particle::{ContentParticle, Occurrence, ParticleKind};

/// Upper bound on parameter-entity expansions per parse.
///
/// A self-referential entity would otherwise splice forever.
const MAX_PE_EXPANSIONS: usize = 10_000;

/// A parsed DTD: declared elements in declaration order, attributes
/// already attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dtd {
    /// Elements in `<!ELEMENT>` declaration order.
    pub elements: Vec<ElementDecl>,
}

/// One `<!ELEMENT>` declaration with its merged `<!ATTLIST>` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    /// Element name as declared.
    pub name: String,
    /// Root of the content-particle tree; `None` for `EMPTY` and `ANY`.
    pub content: Option<ContentParticle>,
    /// Attributes in declaration order; the first declaration of an
    /// attribute name wins when `<!ATTLIST>` blocks are merged.
    pub attributes: Vec<AttributeSpec>,
}

/// DTD parse failure. Always fatal: the run produces no partial output.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: unexpected end of input")]
    UnexpectedEof { line: usize },

    #[error("line {line}: expected {expected}")]
    Expected { expected: &'static str, line: usize },

    #[error("line {line}: unknown declaration `<!{keyword}`")]
    UnknownDeclaration { keyword: String, line: usize },

    #[error("line {line}: element `{name}` declared more than once")]
    DuplicateElement { name: String, line: usize },

    #[error("line {line}: invalid content model: {reason}")]
    InvalidContentModel { reason: &'static str, line: usize },

    #[error("line {line}: invalid attribute type `{found}`")]
    InvalidAttributeType { found: String, line: usize },

    #[error("line {line}: undefined parameter entity `%{name};`")]
    UndefinedParameterEntity { name: String, line: usize },

    #[error("line {line}: parameter entity expansion limit exceeded")]
    RunawayExpansion { line: usize },

    #[error("line {line}: unbalanced conditional section")]
    UnbalancedSection { line: usize },
}

/// Parse DTD source into a [`Dtd`].
///
/// Any syntax the parser cannot make sense of is a fatal [`ParseError`];
/// there is no per-declaration recovery.
pub fn parse(input: &str) -> Result<Dtd, ParseError> {
    Parser::new(input).parse()
}

struct Parser {
    src: String,
    pos: usize,
    pes: HashMap<String, String>,
    expansions: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            src: input.to_owned(),
            pos: 0,
            pes: HashMap::new(),
            expansions: 0,
        }
    }

    fn parse(mut self) -> Result<Dtd, ParseError> {
        let mut elements: Vec<(String, Option<ContentParticle>)> = Vec::new();
        let mut attlists: HashMap<String, Vec<AttributeSpec>> = HashMap::new();
        let mut include_depth = 0usize;

        loop {
            self.skip_misc(&mut include_depth)?;
            if self.at_end() {
                if include_depth > 0 {
                    return Err(ParseError::UnexpectedEof { line: self.line() });
                }
                break;
            }

            if !self.rest().starts_with("<!") {
                return Err(ParseError::Expected {
                    expected: "`<!` declaration",
                    line: self.line(),
                });
            }
            self.advance(2);
            let keyword = self.read_keyword();

            match keyword.as_str() {
                "ELEMENT" => {
                    let (name, content) = self.parse_element_decl()?;
                    if elements.iter().any(|(existing, _)| *existing == name) {
                        return Err(ParseError::DuplicateElement {
                            name,
                            line: self.line(),
                        });
                    }
                    elements.push((name, content));
                }
                "ATTLIST" => {
                    let (element, specs) = self.parse_attlist()?;
                    let merged = attlists.entry(element).or_default();
                    for spec in specs {
                        // First declaration of an attribute name wins.
                        if merged.iter().any(|existing| existing.name == spec.name) {
                            tracing::debug!(
                                attribute = %spec.name,
                                "ignoring redeclared attribute"
                            );
                        } else {
                            merged.push(spec);
                        }
                    }
                }
                "ENTITY" => self.parse_entity_decl()?,
                "NOTATION" => self.skip_to_decl_end()?,
                _ => {
                    return Err(ParseError::UnknownDeclaration {
                        keyword,
                        line: self.line(),
                    });
                }
            }
        }

        let declared: Vec<ElementDecl> = elements
            .into_iter()
            .map(|(name, content)| {
                let attributes = attlists.remove(&name).unwrap_or_default();
                ElementDecl {
                    name,
                    content,
                    attributes,
                }
            })
            .collect();

        for element in attlists.keys() {
            tracing::warn!(element = %element, "attribute list for undeclared element");
        }

        tracing::debug!(elements = declared.len(), "parsed DTD");
        Ok(Dtd { elements: declared })
    }

    // --- Declarations ---

    fn parse_element_decl(&mut self) -> Result<(String, Option<ContentParticle>), ParseError> {
        self.require_ws()?;
        let name = self.read_name()?;
        self.require_ws()?;
        let content = self.parse_content_spec()?;
        self.skip_ws()?;
        self.expect(b'>', "`>`")?;
        Ok((name, content))
    }

    fn parse_content_spec(&mut self) -> Result<Option<ContentParticle>, ParseError> {
        if self.rest().starts_with("EMPTY") {
            self.advance(5);
            return Ok(None);
        }
        if self.rest().starts_with("ANY") {
            self.advance(3);
            return Ok(None);
        }
        self.expect(b'(', "`EMPTY`, `ANY` or `(`")?;
        self.skip_ws()?;

        if self.rest().starts_with("#PCDATA") {
            self.advance(7);
            return self.parse_mixed_tail().map(Some);
        }
        self.parse_group_body().map(Some)
    }

    /// Rest of a mixed content model, after `(#PCDATA` has been consumed.
    fn parse_mixed_tail(&mut self) -> Result<ContentParticle, ParseError> {
        let mut names = Vec::new();
        loop {
            self.skip_ws()?;
            match self.peek() {
                Some(b'|') => {
                    self.advance(1);
                    self.skip_ws()?;
                    names.push(self.read_name()?);
                }
                Some(b')') => {
                    self.advance(1);
                    break;
                }
                _ => {
                    return Err(ParseError::Expected {
                        expected: "`|` or `)`",
                        line: self.line(),
                    });
                }
            }
        }

        let starred = self.peek() == Some(b'*');
        if starred {
            self.advance(1);
        }
        if !names.is_empty() && !starred {
            return Err(ParseError::InvalidContentModel {
                reason: "mixed content with element names requires `*`",
                line: self.line(),
            });
        }

        let occurrence = if starred {
            Occurrence::ZeroOrMore
        } else {
            Occurrence::Once
        };
        if names.is_empty() {
            let mut pcdata = ContentParticle::pcdata();
            pcdata.occurrence = occurrence;
            return Ok(pcdata);
        }
        let rest = names
            .into_iter()
            .map(|name| ContentParticle::element(name, Occurrence::Once))
            .collect();
        Ok(fold_group(
            ParticleKind::Choice,
            occurrence,
            ContentParticle::pcdata(),
            rest,
        ))
    }

    /// A children group, after its `(` has been consumed.
    fn parse_group_body(&mut self) -> Result<ContentParticle, ParseError> {
        self.skip_ws()?;
        let first = self.parse_cp()?;
        let mut rest = Vec::new();
        let mut separator: Option<u8> = None;

        loop {
            self.skip_ws()?;
            match self.peek() {
                Some(sep @ (b',' | b'|')) => {
                    match separator {
                        None => separator = Some(sep),
                        Some(seen) if seen != sep => {
                            return Err(ParseError::InvalidContentModel {
                                reason: "`,` and `|` mixed in one group",
                                line: self.line(),
                            });
                        }
                        Some(_) => {}
                    }
                    self.advance(1);
                    self.skip_ws()?;
                    rest.push(self.parse_cp()?);
                }
                Some(b')') => {
                    self.advance(1);
                    break;
                }
                _ => {
                    return Err(ParseError::Expected {
                        expected: "`,`, `|` or `)`",
                        line: self.line(),
                    });
                }
            }
        }

        let occurrence = self.read_occurrence();
        let kind = if separator == Some(b'|') {
            ParticleKind::Choice
        } else {
            ParticleKind::Sequence
        };
        Ok(fold_group(kind, occurrence, first, rest))
    }

    /// One content particle: a name or a nested group, with an optional
    /// occurrence indicator.
    fn parse_cp(&mut self) -> Result<ContentParticle, ParseError> {
        if self.peek() == Some(b'(') {
            self.advance(1);
            return self.parse_group_body();
        }
        let name = self.read_name()?;
        let occurrence = self.read_occurrence();
        Ok(ContentParticle::element(name, occurrence))
    }

    fn parse_attlist(&mut self) -> Result<(String, Vec<AttributeSpec>), ParseError> {
        self.require_ws()?;
        let element = self.read_name()?;
        let mut attributes = Vec::new();

        loop {
            self.skip_ws()?;
            if self.peek() == Some(b'>') {
                self.advance(1);
                break;
            }
            let name = self.read_name()?;
            self.require_ws()?;
            let attr_type = self.parse_attribute_type()?;
            self.require_ws()?;
            let default = self.parse_default_decl()?;
            attributes.push(AttributeSpec {
                name,
                attr_type,
                default,
            });
        }

        Ok((element, attributes))
    }

    fn parse_attribute_type(&mut self) -> Result<AttributeType, ParseError> {
        if self.peek() == Some(b'(') {
            self.advance(1);
            let values = self.parse_name_group(true)?;
            return Ok(AttributeType::Enumeration(values));
        }

        let keyword = self.read_keyword();
        match keyword.as_str() {
            "CDATA" => Ok(AttributeType::CData),
            "ID" => Ok(AttributeType::Id),
            "IDREF" => Ok(AttributeType::IdRef),
            "IDREFS" => Ok(AttributeType::IdRefs),
            "ENTITY" => Ok(AttributeType::Entity),
            "ENTITIES" => Ok(AttributeType::Entities),
            "NMTOKEN" => Ok(AttributeType::NmToken),
            "NMTOKENS" => Ok(AttributeType::NmTokens),
            "NOTATION" => {
                self.require_ws()?;
                self.expect(b'(', "`(`")?;
                let names = self.parse_name_group(false)?;
                Ok(AttributeType::Notation(names))
            }
            _ => Err(ParseError::InvalidAttributeType {
                found: keyword,
                line: self.line(),
            }),
        }
    }

    /// A `|`-separated group of names, after its `(` has been consumed.
    ///
    /// Enumerated values are nmtokens (digits may lead); notation names
    /// are full names.
    fn parse_name_group(&mut self, nmtokens: bool) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        loop {
            self.skip_ws()?;
            let name = if nmtokens {
                self.read_nmtoken()?
            } else {
                self.read_name()?
            };
            names.push(name);
            self.skip_ws()?;
            match self.peek() {
                Some(b'|') => self.advance(1),
                Some(b')') => {
                    self.advance(1);
                    return Ok(names);
                }
                _ => {
                    return Err(ParseError::Expected {
                        expected: "`|` or `)`",
                        line: self.line(),
                    });
                }
            }
        }
    }

    fn parse_default_decl(&mut self) -> Result<AttributeDefault, ParseError> {
        if self.peek() == Some(b'#') {
            self.advance(1);
            let keyword = self.read_keyword();
            return match keyword.as_str() {
                "REQUIRED" => Ok(AttributeDefault::Required),
                "IMPLIED" => Ok(AttributeDefault::Implied),
                "FIXED" => {
                    self.require_ws()?;
                    Ok(AttributeDefault::Fixed(self.read_quoted()?))
                }
                _ => Err(ParseError::Expected {
                    expected: "`#REQUIRED`, `#IMPLIED` or `#FIXED`",
                    line: self.line(),
                }),
            };
        }
        Ok(AttributeDefault::Value(self.read_quoted()?))
    }

    fn parse_entity_decl(&mut self) -> Result<(), ParseError> {
        self.require_ws()?;
        if self.peek() != Some(b'%') {
            // General entity: irrelevant to the schema model.
            return self.skip_to_decl_end();
        }
        self.advance(1);
        self.require_ws()?;
        let name = self.read_name()?;
        self.require_ws()?;

        if self.rest().starts_with("SYSTEM") || self.rest().starts_with("PUBLIC") {
            tracing::warn!(entity = %name, "external parameter entity is not resolved");
            self.skip_to_decl_end()?;
            self.pes.entry(name).or_default();
            return Ok(());
        }

        let value = self.read_quoted()?;
        self.skip_ws()?;
        self.expect(b'>', "`>`")?;
        // First declaration of an entity wins.
        self.pes.entry(name).or_insert(value);
        Ok(())
    }

    /// Consume the remainder of a declaration through its closing `>`,
    /// skipping over quoted literals.
    fn skip_to_decl_end(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b'>') => {
                    self.advance(1);
                    return Ok(());
                }
                Some(quote @ (b'"' | b'\'')) => {
                    self.advance(1);
                    let Some(end) = self.rest().find(quote as char) else {
                        return Err(ParseError::UnexpectedEof { line: self.line() });
                    };
                    self.advance(end + 1);
                }
                Some(_) => self.advance_char(),
                None => return Err(ParseError::UnexpectedEof { line: self.line() }),
            }
        }
    }

    // --- Inter-declaration trivia ---

    /// Skip whitespace, comments, processing instructions and conditional
    /// section markers between declarations.
    fn skip_misc(&mut self, include_depth: &mut usize) -> Result<(), ParseError> {
        loop {
            self.skip_ws()?;
            let rest = self.rest();
            if rest.starts_with("<!--") {
                let Some(end) = rest.find("-->") else {
                    return Err(ParseError::UnexpectedEof { line: self.line() });
                };
                self.advance(end + 3);
            } else if rest.starts_with("<?") {
                let Some(end) = rest.find("?>") else {
                    return Err(ParseError::UnexpectedEof { line: self.line() });
                };
                self.advance(end + 2);
            } else if rest.starts_with("<![") {
                self.advance(3);
                self.skip_ws()?;
                let keyword = self.read_keyword();
                self.skip_ws()?;
                self.expect(b'[', "`[`")?;
                match keyword.as_str() {
                    "INCLUDE" => *include_depth += 1,
                    "IGNORE" => self.skip_ignore_section()?,
                    _ => {
                        return Err(ParseError::UnknownDeclaration {
                            keyword,
                            line: self.line(),
                        });
                    }
                }
            } else if rest.starts_with("]]>") {
                if *include_depth == 0 {
                    return Err(ParseError::UnbalancedSection { line: self.line() });
                }
                *include_depth -= 1;
                self.advance(3);
            } else {
                return Ok(());
            }
        }
    }

    /// Skip an `IGNORE` section body through its matching `]]>`.
    fn skip_ignore_section(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(ParseError::UnexpectedEof { line: self.line() });
            }
            if rest.starts_with("<![") {
                depth += 1;
                self.advance(3);
            } else if rest.starts_with("]]>") {
                depth -= 1;
                self.advance(3);
            } else {
                self.advance_char();
            }
        }
        Ok(())
    }

    // --- Whitespace and parameter entities ---

    /// Skip whitespace, expanding parameter-entity references in place.
    fn skip_ws(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.advance(1),
                Some(b'%') if self.at_pe_ref() => self.expand_pe_ref()?,
                _ => return Ok(()),
            }
        }
    }

    /// Like [`Self::skip_ws`], but at least one whitespace character (or
    /// an expanded entity boundary) is required.
    fn require_ws(&mut self) -> Result<(), ParseError> {
        let before = self.pos;
        let len_before = self.src.len();
        self.skip_ws()?;
        if self.pos == before && self.src.len() == len_before {
            return Err(ParseError::Expected {
                expected: "whitespace",
                line: self.line(),
            });
        }
        Ok(())
    }

    fn at_pe_ref(&self) -> bool {
        self.src[self.pos..]
            .chars()
            .nth(1)
            .is_some_and(is_name_start)
    }

    /// Replace `%name;` at the cursor with the entity's replacement text,
    /// padded with spaces as the XML spec prescribes for DTD context.
    fn expand_pe_ref(&mut self) -> Result<(), ParseError> {
        self.expansions += 1;
        if self.expansions > MAX_PE_EXPANSIONS {
            return Err(ParseError::RunawayExpansion { line: self.line() });
        }

        let start = self.pos;
        self.advance(1);
        let name = self.read_name()?;
        self.expect(b';', "`;`")?;

        let Some(value) = self.pes.get(&name) else {
            return Err(ParseError::UndefinedParameterEntity {
                name,
                line: self.line(),
            });
        };
        let replacement = format!(" {value} ");
        self.src.replace_range(start..self.pos, &replacement);
        self.pos = start;
        Ok(())
    }

    // --- Low-level cursor ---

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Advance over `n` bytes known to be ASCII.
    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Advance over one character of unknown width.
    fn advance_char(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.peek() == Some(byte) {
            self.advance(1);
            Ok(())
        } else if self.at_end() {
            Err(ParseError::UnexpectedEof { line: self.line() })
        } else {
            Err(ParseError::Expected {
                expected,
                line: self.line(),
            })
        }
    }

    /// Read a run of uppercase ASCII letters (a declaration keyword).
    fn read_keyword(&mut self) -> String {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(rest.len());
        let keyword = rest[..end].to_owned();
        self.advance(end);
        keyword
    }

    fn read_name(&mut self) -> Result<String, ParseError> {
        let rest = &self.src[self.pos..];
        let mut chars = rest.char_indices();
        let Some((_, first)) = chars.next() else {
            return Err(ParseError::UnexpectedEof { line: self.line() });
        };
        if !is_name_start(first) {
            return Err(ParseError::Expected {
                expected: "a name",
                line: self.line(),
            });
        }
        let mut end = first.len_utf8();
        for (idx, c) in chars {
            if !is_name_char(c) {
                break;
            }
            end = idx + c.len_utf8();
        }
        let name = rest[..end].to_owned();
        self.pos += end;
        Ok(name)
    }

    /// Read an nmtoken: like a name, but digits and punctuation may lead.
    fn read_nmtoken(&mut self) -> Result<String, ParseError> {
        let rest = &self.src[self.pos..];
        let end = rest
            .char_indices()
            .find(|&(_, c)| !is_name_char(c))
            .map_or(rest.len(), |(idx, _)| idx);
        if end == 0 {
            return Err(ParseError::Expected {
                expected: "a token",
                line: self.line(),
            });
        }
        let token = rest[..end].to_owned();
        self.pos += end;
        Ok(token)
    }

    fn read_quoted(&mut self) -> Result<String, ParseError> {
        let Some(quote @ (b'"' | b'\'')) = self.peek() else {
            return Err(ParseError::Expected {
                expected: "a quoted literal",
                line: self.line(),
            });
        };
        self.advance(1);
        let Some(end) = self.rest().find(quote as char) else {
            return Err(ParseError::UnexpectedEof { line: self.line() });
        };
        let value = self.rest()[..end].to_owned();
        self.advance(end + 1);
        Ok(value)
    }

    fn read_occurrence(&mut self) -> Occurrence {
        let occurrence = match self.peek() {
            Some(b'?') => Occurrence::Optional,
            Some(b'*') => Occurrence::ZeroOrMore,
            Some(b'+') => Occurrence::OneOrMore,
            _ => return Occurrence::Once,
        };
        self.advance(1);
        occurrence
    }

    fn line(&self) -> usize {
        self.src[..self.pos.min(self.src.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

/// Right-fold group members into nested binary nodes:
/// `(a, b, c)` becomes `seq(a, seq(b, c))`.
fn fold_group(
    kind: ParticleKind,
    occurrence: Occurrence,
    first: ContentParticle,
    rest: Vec<ContentParticle>,
) -> ContentParticle {
    let mut items = rest;
    let Some(mut acc) = items.pop() else {
        // Single-member group; keep a wrapper only when it carries an
        // indicator the member doesn't.
        if occurrence == Occurrence::Once {
            return first;
        }
        return ContentParticle {
            kind,
            occurrence,
            name: None,
            left: Some(Box::new(first)),
            right: None,
        };
    };
    while let Some(item) = items.pop() {
        acc = ContentParticle::group(kind, Occurrence::Once, item, acc);
    }
    let mut root = ContentParticle::group(kind, Occurrence::Once, first, acc);
    root.occurrence = occurrence;
    root
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::particle::flatten;

    fn parse_one(source: &str) -> ElementDecl {
        let dtd = parse(source).unwrap();
        dtd.elements.into_iter().next().unwrap()
    }

    #[test]
    fn test_empty_and_any_have_no_particle() {
        let dtd = parse("<!ELEMENT br EMPTY>\n<!ELEMENT blob ANY>").unwrap();
        assert_eq!(dtd.elements.len(), 2);
        assert!(dtd.elements[0].content.is_none());
        assert!(dtd.elements[1].content.is_none());
    }

    #[test]
    fn test_sequence_group() {
        let decl = parse_one("<!ELEMENT book (title, chapter, index)>");
        let content = decl.content.unwrap();
        assert_eq!(content.kind, ParticleKind::Sequence);
        assert_eq!(flatten(Some(&content)), ["title", "chapter", "index"]);
    }

    #[test]
    fn test_choice_group_with_occurrence() {
        let decl = parse_one("<!ELEMENT body (para | table)+>");
        let content = decl.content.unwrap();
        assert_eq!(content.kind, ParticleKind::Choice);
        assert_eq!(content.occurrence, Occurrence::OneOrMore);
        assert_eq!(flatten(Some(&content)), ["para", "table"]);
    }

    #[test]
    fn test_nested_groups_flatten_in_reading_order() {
        let decl = parse_one("<!ELEMENT doc (head, (section | appendix)*, foot?)>");
        assert_eq!(
            flatten(decl.content.as_ref()),
            ["head", "section", "appendix", "foot"]
        );
    }

    #[test]
    fn test_leaf_occurrence_indicators() {
        let decl = parse_one("<!ELEMENT list (item+)>");
        let content = decl.content.unwrap();
        assert_eq!(content.occurrence, Occurrence::OneOrMore);
        assert_eq!(content.name.as_deref(), Some("item"));
    }

    #[test]
    fn test_mixed_content() {
        let decl = parse_one("<!ELEMENT para (#PCDATA | em | strong)*>");
        let content = decl.content.unwrap();
        assert_eq!(content.kind, ParticleKind::Choice);
        assert_eq!(content.occurrence, Occurrence::ZeroOrMore);
        assert_eq!(flatten(Some(&content)), ["em", "strong"]);
    }

    #[test]
    fn test_pcdata_only() {
        let decl = parse_one("<!ELEMENT title (#PCDATA)>");
        let content = decl.content.unwrap();
        assert_eq!(content.kind, ParticleKind::Pcdata);
        assert!(flatten(Some(&content)).is_empty());
    }

    #[test]
    fn test_mixed_without_star_is_rejected() {
        let err = parse("<!ELEMENT para (#PCDATA | em)>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidContentModel { .. }));
    }

    #[test]
    fn test_mixed_separators_rejected() {
        let err = parse("<!ELEMENT doc (a, b | c)>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidContentModel { .. }));
    }

    #[test]
    fn test_attlist_types_and_defaults() {
        let dtd = parse(
            r#"<!ELEMENT book (#PCDATA)>
               <!ATTLIST book
                   id     ID              #REQUIRED
                   lang   CDATA           #IMPLIED
                   kind   (paper | ebook) "paper"
                   rev    NMTOKEN         #FIXED "1">"#,
        )
        .unwrap();
        let attrs = &dtd.elements[0].attributes;
        assert_eq!(attrs.len(), 4);

        assert_eq!(attrs[0].name, "id");
        assert_eq!(attrs[0].attr_type, AttributeType::Id);
        assert_eq!(attrs[0].default, AttributeDefault::Required);

        assert_eq!(attrs[1].attr_type, AttributeType::CData);
        assert_eq!(attrs[1].default, AttributeDefault::Implied);

        assert_eq!(
            attrs[2].attr_type,
            AttributeType::Enumeration(vec!["paper".to_owned(), "ebook".to_owned()])
        );
        assert_eq!(attrs[2].default, AttributeDefault::Value("paper".to_owned()));

        assert_eq!(attrs[3].attr_type, AttributeType::NmToken);
        assert_eq!(attrs[3].default, AttributeDefault::Fixed("1".to_owned()));
    }

    #[test]
    fn test_notation_attribute_type() {
        let dtd = parse(
            "<!ELEMENT img EMPTY>\n<!ATTLIST img format NOTATION (gif | png) #IMPLIED>",
        )
        .unwrap();
        assert_eq!(
            dtd.elements[0].attributes[0].attr_type,
            AttributeType::Notation(vec!["gif".to_owned(), "png".to_owned()])
        );
    }

    #[test]
    fn test_attlist_merge_first_declaration_wins() {
        let dtd = parse(
            r#"<!ELEMENT a EMPTY>
               <!ATTLIST a x CDATA #IMPLIED>
               <!ATTLIST a x CDATA #REQUIRED
                           y CDATA #IMPLIED>"#,
        )
        .unwrap();
        let attrs = &dtd.elements[0].attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "x");
        assert_eq!(attrs[0].default, AttributeDefault::Implied);
        assert_eq!(attrs[1].name, "y");
    }

    #[test]
    fn test_attlist_before_element_declaration() {
        let dtd = parse("<!ATTLIST a x CDATA #IMPLIED>\n<!ELEMENT a EMPTY>").unwrap();
        assert_eq!(dtd.elements[0].attributes.len(), 1);
    }

    #[test]
    fn test_element_order_is_declaration_order() {
        let dtd = parse(
            "<!ELEMENT zebra EMPTY>\n<!ELEMENT apple EMPTY>\n<!ELEMENT mango EMPTY>",
        )
        .unwrap();
        let names: Vec<&str> = dtd.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_comments_and_pis_are_skipped() {
        let dtd = parse(
            "<!-- a comment -->\n<?pi data?>\n<!ELEMENT a EMPTY>\n<!-- trailing -->",
        )
        .unwrap();
        assert_eq!(dtd.elements.len(), 1);
    }

    #[test]
    fn test_parameter_entity_expansion() {
        let dtd = parse(
            r#"<!ENTITY % inline "em | strong">
               <!ELEMENT para (#PCDATA | %inline;)*>"#,
        )
        .unwrap();
        assert_eq!(flatten(dtd.elements[0].content.as_ref()), ["em", "strong"]);
    }

    #[test]
    fn test_parameter_entity_spanning_declarations() {
        let dtd = parse(
            r#"<!ENTITY % decls "<!ELEMENT a EMPTY> <!ELEMENT b EMPTY>">
               %decls;
               <!ELEMENT c EMPTY>"#,
        )
        .unwrap();
        let names: Vec<&str> = dtd.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_undefined_parameter_entity_is_fatal() {
        let err = parse("<!ELEMENT a (%missing;)>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UndefinedParameterEntity { ref name, .. } if name == "missing"
        ));
    }

    #[test]
    fn test_recursive_parameter_entity_is_fatal() {
        let err = parse(
            r#"<!ENTITY % loop "%loop;">
               <!ELEMENT a (%loop;)>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::RunawayExpansion { .. }));
    }

    #[test]
    fn test_conditional_sections() {
        let dtd = parse(
            r#"<![INCLUDE[
                 <!ELEMENT a EMPTY>
               ]]>
               <![IGNORE[
                 <!ELEMENT b EMPTY>
               ]]>
               <!ELEMENT c EMPTY>"#,
        )
        .unwrap();
        let names: Vec<&str> = dtd.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_duplicate_element_is_fatal() {
        let err = parse("<!ELEMENT a EMPTY>\n<!ELEMENT a EMPTY>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::DuplicateElement { ref name, .. } if name == "a"
        ));
    }

    #[test]
    fn test_garbage_is_fatal() {
        assert!(matches!(
            parse("this is not a DTD").unwrap_err(),
            ParseError::Expected { .. }
        ));
        assert!(matches!(
            parse("<!WIBBLE foo>").unwrap_err(),
            ParseError::UnknownDeclaration { .. }
        ));
    }

    #[test]
    fn test_unterminated_declaration_is_fatal() {
        let err = parse("<!ELEMENT a (b, c").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_error_reports_line() {
        let err = parse("<!ELEMENT a EMPTY>\n<!ELEMENT a EMPTY>").unwrap_err();
        assert_eq!(err.to_string(), "line 2: element `a` declared more than once");
    }

    #[test]
    fn test_general_entities_are_ignored() {
        let dtd = parse(
            r#"<!ENTITY copy "&#169;">
               <!ELEMENT a EMPTY>"#,
        )
        .unwrap();
        assert_eq!(dtd.elements.len(), 1);
    }
}
