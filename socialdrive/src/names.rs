use socialdrive_core::NAME_SUFFIX_LEN;

/// Source of the per-run suffix that keeps account names unique across runs.
pub trait SuffixGenerator {
    fn next_suffix(&mut self) -> String;
}

impl<G: SuffixGenerator + ?Sized> SuffixGenerator for &mut G {
    fn next_suffix(&mut self) -> String {
        (**self).next_suffix()
    }
}

/// First hex characters of a fresh v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl SuffixGenerator for RandomSuffix {
    fn next_suffix(&mut self) -> String {
        let mut suffix = uuid::Uuid::new_v4().simple().to_string();
        suffix.truncate(NAME_SUFFIX_LEN);
        suffix
    }
}

/// Zero-padded counter: `000001`, `000002`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialSuffix {
    next: u64,
}

impl SequentialSuffix {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SuffixGenerator for SequentialSuffix {
    fn next_suffix(&mut self) -> String {
        self.next += 1;
        format!("{:0width$}", self.next, width = NAME_SUFFIX_LEN)
    }
}
