use logic_ast::AstError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot read configuration '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error(transparent)]
    Ast(#[from] AstError),
}
