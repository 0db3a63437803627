pub mod dictionary;
pub mod google;
pub mod loader;
pub mod lookup;
pub mod tokenizer;
pub mod translator;

pub use dictionary::JapaneseDictionary;
pub use google::GoogleTranslator;
pub use loader::TermBankLoader;
pub use lookup::{JapaneseLookup, LookupOptions};
pub use tokenizer::{MecabTokenizer, WhitespaceTokenizer};
pub use translator::DeepLTranslator;
