use crate::algebra::Vector;
use crate::error::{Result, RnnError};
use crate::sequence::Sequence;
use ahash::AHashMap;
use std::hash::Hash;

/// One-hot encoding of a fixed alphabet of symbols.
///
/// Symbol `i` of the alphabet maps to the one-hot vector with a 1 at index `i`.
/// The alphabet must contain a designated unknown symbol; looking up a symbol
/// outside the alphabet returns the unknown symbol's vector.
///
/// # Example
/// ```rust
/// use rustyrnn::dictionary::Dictionary;
///
/// let dictionary = Dictionary::new(vec!['a', 'b', '?'], '?').unwrap();
/// assert_eq!(dictionary.size(), 3);
/// assert_eq!(dictionary.vector(&'b').argmax(), Some(1));
/// assert_eq!(dictionary.vector(&'z').argmax(), Some(2));
///
/// assert!(Dictionary::new(vec!['a', 'a', '?'], '?').is_err());
/// assert!(Dictionary::new(vec!['a', 'b'], '?').is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Dictionary<E> {
    symbols: Vec<E>,
    index: AHashMap<E, usize>,
    unknown_index: usize,
}

impl<E: Eq + Hash + Clone> Dictionary<E> {
    /// Creates a dictionary over `symbols`, in order.
    ///
    /// # Errors
    ///
    /// - `RnnError::DictionaryError` - If a symbol appears twice or `unknown` is not among the symbols
    pub fn new(symbols: Vec<E>, unknown: E) -> Result<Self> {
        let mut index = AHashMap::with_capacity(symbols.len());
        for (i, symbol) in symbols.iter().enumerate() {
            if index.insert(symbol.clone(), i).is_some() {
                return Err(RnnError::DictionaryError(format!(
                    "symbol at position {} appears more than once",
                    i
                )));
            }
        }
        let unknown_index = *index.get(&unknown).ok_or_else(|| {
            RnnError::DictionaryError("the alphabet has no entry for the unknown symbol".to_string())
        })?;

        Ok(Self {
            symbols,
            index,
            unknown_index,
        })
    }

    /// Number of symbols, which is also the dimension of every vector.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[E] {
        &self.symbols
    }

    pub fn unknown(&self) -> &E {
        &self.symbols[self.unknown_index]
    }

    pub fn contains(&self, symbol: &E) -> bool {
        self.index.contains_key(symbol)
    }

    /// Index of `symbol`, falling back to the unknown symbol's index.
    pub fn index_of(&self, symbol: &E) -> usize {
        self.index.get(symbol).copied().unwrap_or(self.unknown_index)
    }

    /// One-hot vector of `symbol` (or of the unknown symbol).
    pub fn vector(&self, symbol: &E) -> Vector {
        let mut elements = vec![0.0; self.size()];
        elements[self.index_of(symbol)] = 1.0;
        Vector::new(elements)
    }

    /// Reverse lookup of an exact one-hot vector of this dictionary.
    ///
    /// Returns `None` for vectors of the wrong size or that are not one-hot.
    pub fn symbol(&self, vector: &Vector) -> Option<&E> {
        if vector.len() != self.size() {
            return None;
        }
        let mut hot = None;
        for (i, &x) in vector.iter().enumerate() {
            if x == 1.0 && hot.is_none() {
                hot = Some(i);
            } else if x != 0.0 {
                return None;
            }
        }
        hot.map(|i| &self.symbols[i])
    }

    /// Symbol at the most likely index of a probability vector; ties pick the first.
    pub fn most_likely(&self, probabilities: &Vector) -> Option<&E> {
        if probabilities.len() != self.size() {
            return None;
        }
        probabilities.argmax().map(|i| &self.symbols[i])
    }
}

/// Builds network sequences from symbol lists and decodes network output.
///
/// # Example
/// ```rust
/// use rustyrnn::dictionary::{Dictionary, SequenceEncoder};
///
/// let encoder = SequenceEncoder::new(Dictionary::new(vec!['a', 'b', 'c', '?'], '?').unwrap());
/// let symbols = ['a', 'b', 'c'];
///
/// let input = encoder.input_sequence(&symbols).unwrap();
/// let output = encoder.output_sequence(&symbols).unwrap();
/// assert_eq!(encoder.decode(&input).unwrap(), vec!['a', 'b', 'c']);
/// assert_eq!(encoder.decode(&output).unwrap(), vec!['b', 'c', 'a']);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceEncoder<E> {
    dictionary: Dictionary<E>,
}

impl<E: Eq + Hash + Clone> SequenceEncoder<E> {
    pub fn new(dictionary: Dictionary<E>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary<E> {
        &self.dictionary
    }

    /// One one-hot vector per symbol.
    pub fn input_sequence(&self, symbols: &[E]) -> Result<Sequence> {
        Sequence::new(symbols.iter().map(|s| self.dictionary.vector(s)).collect())
    }

    /// Expected output for `symbols`: the list shifted left by one step, with the
    /// first symbol wrapped around to the end.
    pub fn output_sequence(&self, symbols: &[E]) -> Result<Sequence> {
        let Some((first, rest)) = symbols.split_first() else {
            return Ok(Sequence::empty());
        };
        Sequence::new(
            rest.iter()
                .chain(std::iter::once(first))
                .map(|s| self.dictionary.vector(s))
                .collect(),
        )
    }

    /// Symbols of a sequence of one-hot or probability vectors (most likely symbol per step).
    ///
    /// # Errors
    ///
    /// - `RnnError::DictionaryError` - If a step does not have the dictionary's dimension
    pub fn decode(&self, sequence: &Sequence) -> Result<Vec<E>> {
        sequence
            .iter()
            .enumerate()
            .map(|(t, v)| {
                self.dictionary.most_likely(v).cloned().ok_or_else(|| {
                    RnnError::DictionaryError(format!(
                        "step {} has dimension {}, dictionary has {} symbols",
                        t,
                        v.len(),
                        self.dictionary.size()
                    ))
                })
            })
            .collect()
    }
}
