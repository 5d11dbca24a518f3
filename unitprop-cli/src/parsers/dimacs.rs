//! A parser for the DIMACS CNF format. DIMACS files can be very large, so the file is read in
//! chunks and the buffers of the parser are re-used between clauses.
//!
//! The parser is invoked through [`parse_cnf`], which passes every clause to a type implementing
//! [`DimacsSink`].
//!
//! The parser is not meant to validate DIMACS files. It should only accept valid files, but the
//! errors it reports are not very detailed.
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::num::NonZeroI32;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use thiserror::Error;
use unitprop_core::Literal;

/// Receives the clauses of a DIMACS file.
pub(crate) trait DimacsSink {
    /// The formula which is produced once all clauses are added.
    type Formula;

    /// Create an empty formula over `num_variables` variables.
    fn empty(num_variables: usize) -> Self;

    /// Add a clause to the formula; the clause may be empty.
    fn add_clause(&mut self, clause: &[NonZeroI32]);

    fn into_formula(self) -> Self::Formula;
}

#[derive(Debug, Error)]
pub(crate) enum DimacsParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("missing dimacs header")]
    MissingHeader,

    #[error("'{0}' is an invalid header")]
    InvalidHeader(String),

    #[error("multiple dimacs headers found")]
    DuplicateHeader,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("'{0}' is an invalid DIMACS literal")]
    InvalidLiteral(String),

    #[error("literal {literal} refers to a variable outside of the {num_variables} declared variables")]
    VariableOutOfRange { literal: i32, num_variables: usize },

    #[error("the last clause in the source is not terminated with a '0'")]
    UnterminatedClause,

    #[error("expected to parse {expected} clauses, but parsed {parsed}")]
    IncorrectClauseCount { expected: usize, parsed: usize },
}

pub(crate) fn parse_cnf<Sink: DimacsSink>(
    source: impl Read,
) -> Result<Sink::Formula, DimacsParseError> {
    let mut reader = BufReader::new(source);
    let mut parser = DimacsParser::<Sink>::new();

    loop {
        let num_bytes = {
            let data = reader.fill_buf()?;

            if data.is_empty() {
                return parser.complete();
            }

            parser.parse_chunk(data)?;
            data.len()
        };

        reader.consume(num_bytes);
    }
}

struct DimacsParser<Sink> {
    sink: Option<Sink>,
    header: Option<CnfHeader>,
    buffer: String,
    clause: Vec<NonZeroI32>,
    state: ParseState,
    parsed_clauses: usize,
}

enum ParseState {
    StartLine,
    Header,
    Comment,
    Literal,
    NegativeLiteral,
    Clause,
}

impl<Sink: DimacsSink> DimacsParser<Sink> {
    fn new() -> Self {
        DimacsParser {
            sink: None,
            header: None,
            buffer: String::new(),
            clause: vec![],
            state: ParseState::StartLine,
            parsed_clauses: 0,
        }
    }

    /// Parse the next chunk of bytes. This may start in the middle of parsing a clause or file
    /// header, and may end in such a state as well.
    fn parse_chunk(&mut self, chunk: &[u8]) -> Result<(), DimacsParseError> {
        for &byte in chunk {
            match self.state {
                ParseState::StartLine => match byte {
                    b if b.is_ascii_whitespace() => {}

                    b'p' => {
                        self.state = ParseState::Header;
                        self.buffer.clear();
                        self.buffer.push('p');
                    }

                    b'c' => self.state = ParseState::Comment,

                    b @ b'1'..=b'9' => self.start_literal(b),

                    // an empty clause, or the terminator of a clause spanning multiple lines
                    b'0' => self.finish_clause()?,

                    b'-' => self.start_literal(b'-'),

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },

                ParseState::Header => match byte {
                    b'\n' => {
                        self.init_formula()?;
                        self.state = ParseState::StartLine;
                    }

                    b => self.buffer.push(b as char),
                },

                ParseState::Comment => {
                    if byte == b'\n' {
                        self.state = ParseState::StartLine;
                    }
                }

                ParseState::Literal => match byte {
                    b if b.is_ascii_whitespace() => {
                        self.finish_literal()?;
                        if b == b'\n' {
                            self.state = ParseState::StartLine;
                        }
                    }

                    b @ b'0'..=b'9' => self.buffer.push(b as char),

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },

                ParseState::NegativeLiteral => match byte {
                    b @ b'1'..=b'9' => {
                        self.buffer.push(b as char);
                        self.state = ParseState::Literal;
                    }

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },

                ParseState::Clause => match byte {
                    b'0' => self.finish_clause()?,

                    // A new-line does not terminate the clause; the literals parsed so far are
                    // kept and the clause continues on the next line.
                    b'\n' => self.state = ParseState::StartLine,
                    b if b.is_ascii_whitespace() => {}

                    b @ b'1'..=b'9' => self.start_literal(b),
                    b'-' => self.start_literal(b'-'),

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },
            }
        }

        Ok(())
    }

    fn start_literal(&mut self, first_byte: u8) {
        self.state = if first_byte == b'-' {
            ParseState::NegativeLiteral
        } else {
            ParseState::Literal
        };

        self.buffer.clear();
        self.buffer.push(first_byte as char);
    }

    fn complete(mut self) -> Result<Sink::Formula, DimacsParseError> {
        match self.state {
            ParseState::Header => self.init_formula()?,
            ParseState::Literal | ParseState::NegativeLiteral => {
                return Err(DimacsParseError::UnterminatedClause)
            }
            _ => {}
        }

        let sink = self.sink.ok_or(DimacsParseError::MissingHeader)?;
        let header = self
            .header
            .expect("if sink is present then header is present");

        if !self.clause.is_empty() {
            Err(DimacsParseError::UnterminatedClause)
        } else if header.num_clauses != self.parsed_clauses {
            Err(DimacsParseError::IncorrectClauseCount {
                expected: header.num_clauses,
                parsed: self.parsed_clauses,
            })
        } else {
            Ok(sink.into_formula())
        }
    }

    fn init_formula(&mut self) -> Result<(), DimacsParseError> {
        if self.header.is_some() {
            return Err(DimacsParseError::DuplicateHeader);
        }

        let header = self.buffer.trim().parse::<CnfHeader>()?;
        self.sink = Some(Sink::empty(header.num_variables));
        self.header = Some(header);

        Ok(())
    }

    fn finish_literal(&mut self) -> Result<(), DimacsParseError> {
        let header = self.header.as_ref().ok_or(DimacsParseError::MissingHeader)?;

        let dimacs_code = self
            .buffer
            .parse::<i32>()
            .map_err(|_| DimacsParseError::InvalidLiteral(self.buffer.clone()))?;

        // The negation of i32::MIN is not representable.
        if dimacs_code == i32::MIN {
            return Err(DimacsParseError::InvalidLiteral(self.buffer.clone()));
        }

        if dimacs_code.unsigned_abs() as usize > header.num_variables {
            return Err(DimacsParseError::VariableOutOfRange {
                literal: dimacs_code,
                num_variables: header.num_variables,
            });
        }

        let literal = NonZeroI32::new(dimacs_code).expect("cannot be 0 here");
        self.clause.push(literal);
        self.state = ParseState::Clause;

        Ok(())
    }

    fn finish_clause(&mut self) -> Result<(), DimacsParseError> {
        let sink = self.sink.as_mut().ok_or(DimacsParseError::MissingHeader)?;

        self.parsed_clauses += 1;
        sink.add_clause(&self.clause);
        self.clause.clear();
        self.state = ParseState::Clause;

        Ok(())
    }
}

struct CnfHeader {
    num_variables: usize,
    num_clauses: usize,
}

impl FromStr for CnfHeader {
    type Err = DimacsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with("p cnf ") {
            return Err(DimacsParseError::InvalidHeader(s.to_owned()));
        }

        let mut components = s.split_whitespace().skip(2);

        let num_variables = next_header_component::<usize>(&mut components, s)?;
        let num_clauses = next_header_component::<usize>(&mut components, s)?;

        if components.next().is_some() {
            return Err(DimacsParseError::InvalidHeader(s.to_owned()));
        }

        Ok(Self {
            num_variables,
            num_clauses,
        })
    }
}

fn next_header_component<'a, Num: FromStr>(
    components: &mut impl Iterator<Item = &'a str>,
    header: &str,
) -> Result<Num, DimacsParseError> {
    components
        .next()
        .ok_or_else(|| DimacsParseError::InvalidHeader(header.to_owned()))?
        .parse::<Num>()
        .map_err(|_| DimacsParseError::InvalidHeader(header.to_owned()))
}

/// The clauses of a DIMACS file, prepared for a [`unitprop_core::UnitPropagator`].
///
/// Repeated literals are removed from a clause and tautological clauses are skipped, as the
/// propagator expects every variable to occur at most once in a clause.
#[derive(Debug, Default)]
pub(crate) struct CnfInstance {
    pub(crate) num_variables: usize,
    pub(crate) clauses: Vec<Vec<Literal>>,
}

impl DimacsSink for CnfInstance {
    type Formula = CnfInstance;

    fn empty(num_variables: usize) -> Self {
        CnfInstance {
            num_variables,
            clauses: vec![],
        }
    }

    fn add_clause(&mut self, clause: &[NonZeroI32]) {
        let mut literals: Vec<Literal> = Vec::with_capacity(clause.len());

        for &code in clause {
            let literal = Literal::new(code);

            if literals.contains(&!literal) {
                debug!(
                    "Skipping tautological clause ({})",
                    clause.iter().join(" ")
                );
                return;
            }

            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }

        self.clauses.push(literals);
    }

    fn into_formula(self) -> Self::Formula {
        self
    }
}
