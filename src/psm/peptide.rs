//! Peptidoform parsing and theoretical m/z
//!
//! idXML writes modified sequences in OpenMS bracket notation:
//!
//! ```text
//! .(Acetyl)PEPTM(Oxidation)IDEK.     named modifications, N-/C-terminal after '.'
//! PEPC(Carbamidomethyl)TIDE          UniMod names
//! PEPM[+15.9949]K                    mass delta
//! PEPM[147.0354]K                    absolute residue mass
//! ```

/// Monoisotopic mass of water
pub const H2O_MASS: f64 = 18.010_564_686_3;

/// Mass of a proton
pub const PROTON_MASS: f64 = 1.007_276_466_621;

/// Errors that can occur when parsing a peptidoform
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PeptideError {
    /// A character that is neither a residue nor a modification delimiter
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Byte offset in the input
        offset: usize,
    },

    /// A `(` or `[` without its closing delimiter
    #[error("unclosed modification starting at offset {0}")]
    UnclosedModification(usize),

    /// The peptidoform contains no residues
    #[error("empty sequence")]
    EmptySequence,
}

/// A modification attached to a residue or terminus
#[derive(Debug, Clone, PartialEq)]
pub struct Modification {
    /// 0 for the N-terminus, 1..=n for residues, n+1 for the C-terminus
    pub position: usize,
    /// UniMod name, or the bracket text for mass annotations
    pub name: String,
    /// Mass shift, when known
    pub delta: Option<f64>,
}

/// A parsed peptidoform
#[derive(Debug, Clone, PartialEq)]
pub struct Peptidoform {
    residues: String,
    modifications: Vec<Modification>,
}

impl Peptidoform {
    /// Parse OpenMS bracket notation
    pub fn parse(input: &str) -> Result<Self, PeptideError> {
        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let mut residues = String::with_capacity(input.len());
        let mut modifications = Vec::new();
        let mut c_terminal = false;
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];
            match c {
                '.' => {
                    // Leading '.' marks the N-terminus, a trailing one the C-terminus
                    if !residues.is_empty() {
                        c_terminal = true;
                    }
                    i += 1;
                }
                '(' | '[' => {
                    let (open, close) = if c == '(' { ('(', ')') } else { ('[', ']') };
                    let mut depth = 0usize;
                    let mut end = None;
                    for (j, &(_, ch)) in chars.iter().enumerate().skip(i) {
                        if ch == open {
                            depth += 1;
                        } else if ch == close {
                            depth -= 1;
                            if depth == 0 {
                                end = Some(j);
                                break;
                            }
                        }
                    }
                    let end = end.ok_or(PeptideError::UnclosedModification(offset))?;
                    let inner: String = chars[i + 1..end].iter().map(|&(_, ch)| ch).collect();

                    let position = if c_terminal {
                        residues.len() + 1
                    } else {
                        residues.len()
                    };
                    let modification = if c == '(' {
                        Modification {
                            position,
                            delta: modification_mass(&inner),
                            name: inner,
                        }
                    } else {
                        let residue = residues.chars().last().filter(|_| !c_terminal);
                        Modification {
                            position,
                            delta: bracket_delta(&inner, residue),
                            name: format!("[{}]", inner),
                        }
                    };
                    modifications.push(modification);
                    i = end + 1;
                }
                c if c.is_ascii_uppercase() && !c_terminal => {
                    residues.push(c);
                    i += 1;
                }
                character => {
                    return Err(PeptideError::UnexpectedCharacter { character, offset });
                }
            }
        }

        if residues.is_empty() {
            return Err(PeptideError::EmptySequence);
        }

        Ok(Self {
            residues,
            modifications,
        })
    }

    /// Unmodified sequence
    pub fn stripped_sequence(&self) -> &str {
        &self.residues
    }

    /// Modifications in order of appearance
    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// Modifications rendered as `{position}-{name}`
    pub fn modification_labels(&self) -> Vec<String> {
        self.modifications
            .iter()
            .map(|m| format!("{}-{}", m.position, m.name))
            .collect()
    }

    /// Monoisotopic neutral mass, `None` if any residue or modification is unknown
    pub fn monoisotopic_mass(&self) -> Option<f64> {
        let mut mass = H2O_MASS;
        for residue in self.residues.chars() {
            mass += residue_mass(residue)?;
        }
        for modification in &self.modifications {
            mass += modification.delta?;
        }
        Some(mass)
    }

    /// Theoretical m/z at the given charge
    pub fn theoretical_mz(&self, charge: i16) -> Option<f64> {
        if charge <= 0 {
            return None;
        }
        let z = f64::from(charge);
        self.monoisotopic_mass()
            .map(|mass| (mass + z * PROTON_MASS) / z)
    }
}

/// Monoisotopic residue mass
pub fn residue_mass(residue: char) -> Option<f64> {
    let mass = match residue {
        'G' => 57.021_463_72,
        'A' => 71.037_113_79,
        'S' => 87.032_028_41,
        'P' => 97.052_763_85,
        'V' => 99.068_413_91,
        'T' => 101.047_678_5,
        'C' => 103.009_184_5,
        'L' | 'I' => 113.084_064_0,
        'N' => 114.042_927_5,
        'D' => 115.026_943_1,
        'Q' => 128.058_577_5,
        'K' => 128.094_963_0,
        'E' => 129.042_593_1,
        'M' => 131.040_484_6,
        'H' => 137.058_911_9,
        'F' => 147.068_413_9,
        'U' => 150.953_635_5,
        'R' => 156.101_111_0,
        'Y' => 163.063_328_5,
        'W' => 186.079_293_0,
        'O' => 237.147_726_9,
        _ => return None,
    };
    Some(mass)
}

/// Monoisotopic mass shift of a named modification
pub fn modification_mass(name: &str) -> Option<f64> {
    let mass = match name {
        "Oxidation" | "UniMod:35" => 15.994_915,
        "Carbamidomethyl" | "UniMod:4" => 57.021_464,
        "Acetyl" | "UniMod:1" => 42.010_565,
        "Phospho" | "UniMod:21" => 79.966_331,
        "Deamidated" | "UniMod:7" => 0.984_016,
        "Amidated" | "UniMod:2" => -0.984_016,
        "Methyl" | "UniMod:34" => 14.015_650,
        "Dimethyl" | "UniMod:36" => 28.031_300,
        "Carbamyl" | "UniMod:5" => 43.005_814,
        "GlyGly" | "UniMod:121" => 114.042_927,
        "TMT6plex" | "UniMod:737" => 229.162_932,
        "iTRAQ4plex" | "UniMod:214" => 144.102_063,
        "Label:13C(6)15N(2)" | "UniMod:259" => 8.014_199,
        "Label:13C(6)15N(4)" | "UniMod:267" => 10.008_269,
        _ => return None,
    };
    Some(mass)
}

/// Mass shift of a bracket annotation: signed values are deltas, unsigned
/// values are absolute residue masses
fn bracket_delta(inner: &str, residue: Option<char>) -> Option<f64> {
    let value: f64 = inner.trim().parse().ok()?;
    if inner.starts_with('+') || inner.starts_with('-') {
        Some(value)
    } else {
        residue.and_then(residue_mass).map(|base| value - base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sequence() {
        let peptide = Peptidoform::parse("PEPTIDEK").unwrap();
        assert_eq!(peptide.stripped_sequence(), "PEPTIDEK");
        assert!(peptide.modifications().is_empty());
    }

    #[test]
    fn test_named_modifications() {
        let peptide = Peptidoform::parse(".(Acetyl)PEPM(Oxidation)C(Carbamidomethyl)K").unwrap();
        assert_eq!(peptide.stripped_sequence(), "PEPMCK");
        assert_eq!(
            peptide.modification_labels(),
            vec!["0-Acetyl", "4-Oxidation", "5-Carbamidomethyl"]
        );
    }

    #[test]
    fn test_nested_parentheses_in_label() {
        let peptide = Peptidoform::parse("PEPTIDEK(Label:13C(6)15N(2))").unwrap();
        assert_eq!(peptide.modifications()[0].name, "Label:13C(6)15N(2)");
        assert_eq!(peptide.modifications()[0].position, 8);
        assert!(peptide.modifications()[0].delta.is_some());
    }

    #[test]
    fn test_c_terminal_modification() {
        let peptide = Peptidoform::parse("PEPTIDE.(Amidated)").unwrap();
        assert_eq!(peptide.modifications()[0].position, 8);
    }

    #[test]
    fn test_bracket_delta_and_absolute_mass() {
        let delta = Peptidoform::parse("PEPM[+15.9949]K").unwrap();
        let absolute = Peptidoform::parse("PEPM[147.0354]K").unwrap();
        let d1 = delta.modifications()[0].delta.unwrap();
        let d2 = absolute.modifications()[0].delta.unwrap();
        assert!((d1 - 15.9949).abs() < 1e-6);
        assert!((d2 - 15.9949).abs() < 1e-3);
    }

    #[test]
    fn test_theoretical_mz() {
        // PEPTIDE, [M+H]+ = 800.3672
        let peptide = Peptidoform::parse("PEPTIDE").unwrap();
        let mz = peptide.theoretical_mz(1).unwrap();
        assert!((mz - 800.367_2).abs() < 1e-3, "{mz}");

        let mz2 = peptide.theoretical_mz(2).unwrap();
        assert!((mz2 - 400.687_2).abs() < 1e-3, "{mz2}");
    }

    #[test]
    fn test_unknown_modification_has_no_mass() {
        let peptide = Peptidoform::parse("PEPS(Mystery)K").unwrap();
        assert_eq!(peptide.theoretical_mz(2), None);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(Peptidoform::parse(""), Err(PeptideError::EmptySequence));
        assert!(matches!(
            Peptidoform::parse("PEP(Oxidation"),
            Err(PeptideError::UnclosedModification(3))
        ));
        assert!(matches!(
            Peptidoform::parse("pep"),
            Err(PeptideError::UnexpectedCharacter { character: 'p', .. })
        ));
    }
}
