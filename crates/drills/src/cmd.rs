use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};

use tokenize::{
    compare, decode_with, encode, persist, Code, PipelineConfig, Tokenize, TokenizerKind,
};

/// How many tokens or codes each step previews.
const PREVIEW: usize = 20;
/// How many top entries `vocab` reports.
const TOP: usize = 10;

#[derive(Subcommand)]
pub enum Command {
    /// Split raw text into tokens and write them one per line.
    Tokenize {
        /// Raw text file, or `-` for stdin.
        input: PathBuf,

        /// Token file to write.
        #[arg(short, long, default_value = "tokens.txt")]
        output: PathBuf,

        #[command(flatten)]
        tokenizer: TokenizerArgs,
    },

    /// Count token frequencies and write the top entries as a JSON mapping.
    Vocab {
        /// Token file produced by `tokenize`.
        #[arg(default_value = "tokens.txt")]
        tokens: PathBuf,

        /// Vocabulary file to write.
        #[arg(short, long, default_value = "vocabulary.json")]
        output: PathBuf,

        /// Maximum number of entries (overrides the config).
        #[arg(long, allow_negative_numbers = true)]
        max_size: Option<i64>,
    },

    /// Tokenize text and write its codes as a JSON array.
    Encode {
        /// Raw text file, or `-` for stdin.
        input: PathBuf,

        /// Vocabulary file produced by `vocab`.
        #[arg(long, default_value = "vocabulary.json")]
        vocab: PathBuf,

        /// Encoded file to write.
        #[arg(short, long, default_value = "encoded_text.json")]
        output: PathBuf,

        #[command(flatten)]
        tokenizer: TokenizerArgs,
    },

    /// Decode a JSON array of codes back into tokens.
    Decode {
        /// Encoded file produced by `encode`.
        #[arg(default_value = "encoded_text.json")]
        codes: PathBuf,

        /// Vocabulary file produced by `vocab`.
        #[arg(long, default_value = "vocabulary.json")]
        vocab: PathBuf,

        /// Raw text to compare the decoded tokens against.
        #[arg(long)]
        original: Option<PathBuf>,

        #[command(flatten)]
        tokenizer: TokenizerArgs,
    },
}

#[derive(clap::Args)]
pub struct TokenizerArgs {
    /// Tokenizer variant (overrides the config).
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Stop-word file, one word per line (overrides the config).
    #[arg(long)]
    stop_words: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Simple,
    StopWord,
}

impl From<KindArg> for TokenizerKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Simple => TokenizerKind::Simple,
            KindArg::StopWord => TokenizerKind::StopWord,
        }
    }
}

impl TokenizerArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(kind) = self.kind {
            config.tokenizer = kind.into();
        }
        if let Some(path) = &self.stop_words {
            config.stop_words = Some(path.clone());
        }
    }
}

pub fn run(command: Command, mut config: PipelineConfig) -> Result<()> {
    match command {
        Command::Tokenize { input, output, tokenizer } => {
            tokenizer.apply(&mut config);
            let text = read_input(&input)?;
            let tokens = config.tokenizer()?.tokenize(&text);
            log::info!("tokenized {} characters with {} tokenizer", text.len(), config.tokenizer);

            println!("First {PREVIEW} tokens: {:?}", preview(&tokens));
            println!("Total tokens: {}", tokens.len());

            persist::write_tokens(&output, &tokens)
                .with_context(|| format!("Failed to write tokens: {}", output.display()))?;
            println!("Saved tokens to {}", output.display());
        }

        Command::Vocab { tokens, output, max_size } => {
            if let Some(n) = max_size {
                config.max_vocab_size = n;
            }
            let builder = config.builder()?;
            let tokens = persist::read_tokens(&tokens)
                .with_context(|| format!("Failed to read tokens: {}", tokens.display()))?;
            let vocab = builder.build(&tokens);

            println!("Vocabulary size: {}", vocab.len());
            let top: Vec<(&str, usize)> = vocab.frequencies().take(TOP).collect();
            println!("Top {TOP} words: {top:?}");

            persist::write_vocabulary(&output, &vocab)
                .with_context(|| format!("Failed to write vocabulary: {}", output.display()))?;
            println!("Saved vocabulary to {}", output.display());
        }

        Command::Encode { input, vocab, output, tokenizer } => {
            tokenizer.apply(&mut config);
            let vocabulary = persist::read_vocabulary(&vocab)
                .with_context(|| format!("Failed to read vocabulary: {}", vocab.display()))?;
            let text = read_input(&input)?;
            let tokens = config.tokenizer()?.tokenize(&text);
            let codes = encode(&tokens, &vocabulary);

            println!("First {PREVIEW} encoded tokens: {:?}", preview(&codes));

            persist::write_codes(&output, &codes)
                .with_context(|| format!("Failed to write codes: {}", output.display()))?;
            println!("Saved encoded text to {}", output.display());
        }

        Command::Decode { codes, vocab, original, tokenizer } => {
            tokenizer.apply(&mut config);
            let vocabulary = persist::read_vocabulary(&vocab)
                .with_context(|| format!("Failed to read vocabulary: {}", vocab.display()))?;
            config
                .check_placeholder(&vocabulary)
                .with_context(|| format!("Cannot decode with {}", vocab.display()))?;
            let codes: Vec<Code> = persist::read_codes(&codes)
                .with_context(|| format!("Failed to read codes: {}", codes.display()))?;
            let decoded = decode_with(&codes, &vocabulary, &config.unknown_token);

            println!("First {PREVIEW} decoded tokens: {:?}", preview(&decoded));

            if let Some(path) = original {
                let text = read_input(&path)?;
                let tokens = config.tokenizer()?.tokenize(&text);
                println!("First {PREVIEW} original tokens: {:?}", preview(&tokens));

                let cmp = compare(&tokens, &decoded, &config.unknown_token);
                println!(
                    "Matched {} of {} tokens ({:.1}%), {} unknown, {} mismatched",
                    cmp.matched,
                    cmp.compared,
                    cmp.match_ratio() * 100.0,
                    cmp.unknown,
                    cmp.mismatched
                );
                if tokens.len() != decoded.len() {
                    log::warn!(
                        "length differs: {} original tokens, {} decoded",
                        tokens.len(),
                        decoded.len()
                    );
                }
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        persist::read_text(path)
            .with_context(|| format!("Failed to read input: {}", path.display()))
    }
}

fn preview<T>(items: &[T]) -> &[T] {
    items.get(..PREVIEW).unwrap_or(items)
}
