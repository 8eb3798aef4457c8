use std::time::Duration;

/// Address used when no target is given on the command line.
pub const DEFAULT_ADDRESS: &str = "localhost:9090";

/// Number of accounts the workflow creates. The gate requires all of them.
pub const DEFAULT_ACCOUNT_COUNT: usize = 5;

pub const DEFAULT_NAME_PREFIX: &str = "Usuario_Rs";

pub const DEFAULT_NAME_STEMS: [&str; 5] = ["Alfa", "Bravo", "Charlie", "Delta", "Echo"];

pub const DEFAULT_POST_TEMPLATE: &str =
    "Olá comunidade! Sou {name}. Este é meu primeiro post através do cliente Rust!";

pub const DEFAULT_RING_TEMPLATE: &str = "Olá {receiver}, tudo bem por aí? De: {sender}.";

/// Sparse sender/receiver sample for the direct message pattern.
pub const DEFAULT_DIRECT_MESSAGES: [(usize, usize, &str); 2] = [
    (0, 3, "E aí, {receiver}! Uma mensagem especial de {sender}."),
    (2, 4, "Oi {receiver}, {sender} aqui, só para constar!"),
];

pub const CREATE_ACCOUNT_TIMEOUT: Duration = Duration::from_secs(15);
pub const FOLLOW_TIMEOUT: Duration = Duration::from_secs(10);
pub const CREATE_POST_TIMEOUT: Duration = Duration::from_secs(15);
pub const SEND_MESSAGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Characters of a post or message body kept in operation records.
pub const PREVIEW_CHARS: usize = 30;

/// Hex characters of randomness appended to generated account names.
pub const NAME_SUFFIX_LEN: usize = 6;
