use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use sift_core::query::TokenKind;

#[derive(Debug, Args)]
pub struct TokenizeArgs {
    pub query: String,
}

#[derive(Debug, Args)]
pub struct ExplainArgs {
    pub query: String,
}

pub fn tokenize(ctx: &Context<'_>, args: TokenizeArgs) -> Result<()> {
    let tokens = ctx.compiler().tokenize(&args.query)?;

    if ctx.json {
        print_json(&tokens)?;
        return Ok(());
    }

    for token in tokens {
        let kind = match token.kind() {
            TokenKind::Word => "word",
            TokenKind::Quoted => "quoted",
            TokenKind::Group => "group",
        };
        println!("{}\t{}", kind, token.text());
    }
    Ok(())
}

pub fn explain(ctx: &Context<'_>, args: ExplainArgs) -> Result<()> {
    let predicate = ctx.compiler().compile(&args.query)?;

    if ctx.json {
        print_json(&predicate)?;
    } else if predicate.is_true() {
        println!("matches every track");
    } else {
        println!("{}", predicate);
    }
    Ok(())
}
