use uuid::Uuid;

/// Source of fresh catalog entry identifiers.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Short random identifiers of the form `g` followed by 7 hex digits.
#[derive(Default, Debug, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        format!("g{}", &uuid[..7])
    }
}

/// Deterministic identifiers `{prefix}1`, `{prefix}2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        SequentialIds {
            prefix: prefix.to_owned(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
