//! Pairing identification files with spectral files

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::input::{InputMode, InputSet};

/// How identification entries were paired with spectral files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingStrategy {
    /// No spectral set was given
    Unpaired,
    /// Both sides are explicit lists: entry `i` pairs with spectral file `i`
    Index,
    /// At least one side is a directory scan: entries pair by file stem
    Stem,
}

impl PairingStrategy {
    /// Select the strategy for the given input modes
    pub fn select(identification: InputMode, spectral: Option<InputMode>) -> Self {
        match spectral {
            None => PairingStrategy::Unpaired,
            Some(InputMode::ExplicitList) if identification == InputMode::ExplicitList => {
                PairingStrategy::Index
            }
            Some(_) => PairingStrategy::Stem,
        }
    }
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingStrategy::Unpaired => write!(f, "none"),
            PairingStrategy::Index => write!(f, "index"),
            PairingStrategy::Stem => write!(f, "stem"),
        }
    }
}

/// One identification file and the spectral file it was paired with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedEntry {
    /// Position in the identification set
    pub index: usize,
    /// idXML file
    pub identification: PathBuf,
    /// mzML file, if one was paired
    pub spectral: Option<PathBuf>,
}

/// The pairing of a whole batch, one entry per identification file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    strategy: PairingStrategy,
    entries: Vec<PairedEntry>,
}

impl Pairing {
    /// Strategy used to build the pairing
    pub fn strategy(&self) -> PairingStrategy {
        self.strategy
    }

    /// Entries in identification order
    pub fn entries(&self) -> &[PairedEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a spectral file
    pub fn paired_count(&self) -> usize {
        self.entries.iter().filter(|e| e.spectral.is_some()).count()
    }
}

/// File name without directory or final extension
pub fn file_stem_key(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Pair identification files with spectral files.
///
/// Does no file-system access. With stem pairing, a stem that occurs more
/// than once in the spectral set resolves to its last occurrence.
pub fn build_pairing(identification: &InputSet, spectral: Option<&InputSet>) -> Pairing {
    let strategy = PairingStrategy::select(identification.mode(), spectral.map(InputSet::mode));
    let ids = identification.files();

    let spectral_for: Vec<Option<PathBuf>> = match (strategy, spectral) {
        (PairingStrategy::Index, Some(spectral)) => (0..ids.len())
            .map(|i| spectral.files().get(i).cloned())
            .collect(),
        (PairingStrategy::Stem, Some(spectral)) => {
            let by_stem: HashMap<String, &PathBuf> = spectral
                .files()
                .iter()
                .filter_map(|path| file_stem_key(path).map(|stem| (stem, path)))
                .collect();
            ids.iter()
                .map(|id| {
                    file_stem_key(id)
                        .and_then(|stem| by_stem.get(&stem))
                        .map(|path| (*path).clone())
                })
                .collect()
        }
        _ => vec![None; ids.len()],
    };

    let entries = ids
        .iter()
        .zip(spectral_for)
        .enumerate()
        .map(|(index, (id, spectral))| PairedEntry {
            index,
            identification: id.clone(),
            spectral,
        })
        .collect();

    Pairing { strategy, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(mode: InputMode, names: &[&str]) -> InputSet {
        InputSet::new(mode, names.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn test_strategy_selection() {
        use InputMode::*;
        assert_eq!(PairingStrategy::select(Directory, None), PairingStrategy::Unpaired);
        assert_eq!(
            PairingStrategy::select(ExplicitList, Some(ExplicitList)),
            PairingStrategy::Index
        );
        assert_eq!(
            PairingStrategy::select(ExplicitList, Some(Directory)),
            PairingStrategy::Stem
        );
        assert_eq!(
            PairingStrategy::select(Directory, Some(ExplicitList)),
            PairingStrategy::Stem
        );
        assert_eq!(
            PairingStrategy::select(Directory, Some(Directory)),
            PairingStrategy::Stem
        );
    }

    #[test]
    fn test_index_pairing_shorter_spectral_list() {
        let ids = set(InputMode::ExplicitList, &["x/a.idXML", "x/b.idXML", "x/c.idXML"]);
        let spectra = set(InputMode::ExplicitList, &["y/z.mzML", "y/q.mzML"]);
        let pairing = build_pairing(&ids, Some(&spectra));

        assert_eq!(pairing.strategy(), PairingStrategy::Index);
        let paired: Vec<_> = pairing.entries().iter().map(|e| e.spectral.clone()).collect();
        assert_eq!(
            paired,
            vec![
                Some(PathBuf::from("y/z.mzML")),
                Some(PathBuf::from("y/q.mzML")),
                None
            ]
        );
        assert_eq!(pairing.paired_count(), 2);
    }

    #[test]
    fn test_stem_pairing() {
        let ids = set(InputMode::Directory, &["in/a.idXML", "in/b.idXML"]);
        let spectra = set(InputMode::ExplicitList, &["raw/b.mzML", "raw/c.mzML"]);
        let pairing = build_pairing(&ids, Some(&spectra));

        assert_eq!(pairing.strategy(), PairingStrategy::Stem);
        assert_eq!(pairing.entries()[0].spectral, None);
        assert_eq!(
            pairing.entries()[1].spectral,
            Some(PathBuf::from("raw/b.mzML"))
        );
    }

    #[test]
    fn test_stem_pairing_duplicate_stem_last_wins() {
        let ids = set(InputMode::Directory, &["a.idXML"]);
        let spectra = set(InputMode::Directory, &["one/a.mzML", "two/a.mzML"]);
        let pairing = build_pairing(&ids, Some(&spectra));
        assert_eq!(
            pairing.entries()[0].spectral,
            Some(PathBuf::from("two/a.mzML"))
        );
    }

    #[test]
    fn test_unpaired() {
        let ids = set(InputMode::Directory, &["a.idXML", "b.idXML"]);
        let pairing = build_pairing(&ids, None);
        assert_eq!(pairing.strategy(), PairingStrategy::Unpaired);
        assert_eq!(pairing.paired_count(), 0);
        assert_eq!(pairing.entries()[1].index, 1);
    }

    fn stems() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-e]{1,2}", 1..8)
    }

    proptest! {
        #[test]
        fn prop_one_entry_per_identification(
            id_stems in stems(),
            spectral_stems in stems(),
            id_list in any::<bool>(),
            spectral_list in any::<bool>(),
        ) {
            let mode = |list: bool| if list { InputMode::ExplicitList } else { InputMode::Directory };
            let ids = InputSet::new(
                mode(id_list),
                id_stems.iter().map(|s| PathBuf::from(format!("{s}.idXML"))).collect(),
            );
            let spectra = InputSet::new(
                mode(spectral_list),
                spectral_stems.iter().map(|s| PathBuf::from(format!("{s}.mzML"))).collect(),
            );
            let pairing = build_pairing(&ids, Some(&spectra));

            prop_assert_eq!(pairing.len(), ids.len());
            for (i, entry) in pairing.entries().iter().enumerate() {
                prop_assert_eq!(entry.index, i);
                prop_assert_eq!(&entry.identification, &ids.files()[i]);
            }
        }

        #[test]
        fn prop_index_pairing(id_count in 1usize..10, spectral_count in 1usize..10) {
            let ids = InputSet::new(
                InputMode::ExplicitList,
                (0..id_count).map(|i| PathBuf::from(format!("id{i}.idXML"))).collect(),
            );
            let spectra = InputSet::new(
                InputMode::ExplicitList,
                (0..spectral_count).map(|i| PathBuf::from(format!("sp{i}.mzML"))).collect(),
            );
            let pairing = build_pairing(&ids, Some(&spectra));

            for entry in pairing.entries() {
                prop_assert_eq!(entry.spectral.as_ref(), spectra.files().get(entry.index));
            }
        }

        #[test]
        fn prop_stem_pairing(id_stems in stems(), spectral_stems in stems()) {
            let ids = InputSet::new(
                InputMode::Directory,
                id_stems.iter().map(|s| PathBuf::from(format!("{s}.idXML"))).collect(),
            );
            let spectra = InputSet::new(
                InputMode::Directory,
                spectral_stems.iter().map(|s| PathBuf::from(format!("{s}.mzML"))).collect(),
            );
            let pairing = build_pairing(&ids, Some(&spectra));

            for (entry, stem) in pairing.entries().iter().zip(&id_stems) {
                match &entry.spectral {
                    Some(path) => {
                        let key = file_stem_key(path);
                        prop_assert_eq!(key.as_ref(), Some(stem));
                    }
                    None => prop_assert!(!spectral_stems.contains(stem)),
                }
            }
        }
    }
}
