//! Show the token registered at an index.

use anyhow::Result;
use clap::Args;

use crate::context::TokenContext;
use crate::core::TokenError;

/// Command to look up a token by index.
#[derive(Args)]
pub struct LookupCommand {
    /// Registration index. Negative and unused indices report "not found".
    #[arg(allow_negative_numbers = true)]
    index: i64,
}

impl LookupCommand {
    pub fn execute(self, context: &TokenContext) -> Result<()> {
        let id = usize::try_from(self.index).ok().and_then(|index| context.lookup(index));

        match id {
            Some(id) => {
                println!("{id}");
                Ok(())
            }
            None => Err(TokenError::Other {
                message: format!("No token at index {}", self.index),
            }
            .into()),
        }
    }
}
