//! wav-stego - hide byte payloads inside PCM WAV audio.
//!
//! Four embedding techniques (LSB bit-plane, echo hiding, phase coding,
//! spread spectrum), an AES-256-CBC payload cipher, SNR/PSNR comparison,
//! and a two-layer pipeline driving steghide followed by an in-buffer pass.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use wav_stego::audio::{self, synth};
use wav_stego::codec::Technique;
use wav_stego::config::{EchoParams, DEFAULT_BLOCK_SIZE, DEFAULT_CHIP_SIZE};
use wav_stego::crypto;
use wav_stego::external::Steghide;
use wav_stego::framing::Framer;
use wav_stego::pipeline::LayeredPipeline;

#[derive(Parser)]
#[command(name = "wav-stego")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Multi-technique audio steganography for PCM WAV carriers",
    long_about = "Embeds byte payloads in WAV audio via LSB, echo hiding, phase coding, \
                  or spread spectrum, with optional AES-256-CBC payload encryption and a \
                  layered steghide pipeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which embedding technique to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TechniqueKind {
    /// Bit-plane substitution
    Lsb,
    /// Delayed-echo windows
    Echo,
    /// FFT block phase
    Phase,
    /// Pseudorandom chip correlation
    Spread,
}

#[derive(Args)]
struct TechniqueArgs {
    /// Embedding technique
    #[arg(long, value_enum, default_value_t = TechniqueKind::Lsb)]
    technique: TechniqueKind,

    /// Bit plane for LSB (0 = least significant .. 7)
    #[arg(long, default_value_t = 0)]
    bit_position: u8,

    /// FFT block size for phase coding
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Samples per bit for spread spectrum
    #[arg(long, default_value_t = DEFAULT_CHIP_SIZE)]
    chip_size: usize,

    /// Chip-sequence seed for spread spectrum
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Echo delay in samples for bit 0 (default: ~1 ms of the carrier rate)
    #[arg(long)]
    delay_short: Option<usize>,

    /// Echo delay in samples for bit 1 (default: ~2 ms of the carrier rate)
    #[arg(long)]
    delay_long: Option<usize>,

    /// Echo attenuation factor
    #[arg(long, default_value_t = 0.5)]
    decay: f64,
}

impl TechniqueArgs {
    /// Resolve flags into a technique, deriving echo delays from the
    /// carrier's sample rate when not given explicitly.
    fn resolve(&self, sample_rate: u32) -> Technique {
        match self.technique {
            TechniqueKind::Lsb => Technique::Lsb {
                bit_position: self.bit_position,
            },
            TechniqueKind::Echo => {
                let defaults = EchoParams::from_sample_rate(sample_rate);
                Technique::EchoHiding(EchoParams {
                    delay_short: self.delay_short.unwrap_or(defaults.delay_short),
                    delay_long: self.delay_long.unwrap_or(defaults.delay_long),
                    decay: self.decay,
                })
            }
            TechniqueKind::Phase => Technique::PhaseCoding {
                block_size: self.block_size,
            },
            TechniqueKind::Spread => Technique::SpreadSpectrum {
                chip_size: self.chip_size,
                seed: self.seed,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a message in a WAV carrier
    Hide {
        /// Carrier WAV file
        carrier: PathBuf,

        /// Output stego WAV file
        output: PathBuf,

        /// Message text to embed
        #[arg(long, conflicts_with = "input")]
        message: Option<String>,

        /// File whose bytes will be embedded
        #[arg(long, conflicts_with = "message")]
        input: Option<PathBuf>,

        /// Encrypt the payload with this key file before embedding
        #[arg(long)]
        key: Option<PathBuf>,

        /// End-of-message marker
        #[arg(long, default_value = "$#*")]
        marker: String,

        #[command(flatten)]
        technique: TechniqueArgs,
    },

    /// Extract a hidden message from a stego WAV
    Reveal {
        /// Stego WAV file
        carrier: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Decrypt the recovered payload with this key file
        #[arg(long)]
        key: Option<PathBuf>,

        /// End-of-message marker
        #[arg(long, default_value = "$#*")]
        marker: String,

        #[command(flatten)]
        technique: TechniqueArgs,
    },

    /// Encrypt a file with AES-256-CBC
    Encrypt {
        /// File to encrypt
        input: PathBuf,

        /// Key file (32 raw bytes)
        #[arg(long, default_value = "key.bin")]
        key: PathBuf,

        /// Output file (default: <input>.enc)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a file produced by `encrypt`
    Decrypt {
        /// File to decrypt
        input: PathBuf,

        /// Key file (32 raw bytes)
        #[arg(long, default_value = "key.bin")]
        key: PathBuf,

        /// Output file (default: <input>.dec)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Generate a random 32-byte key file
    Keygen {
        /// Where to write the key
        #[arg(default_value = "key.bin")]
        output: PathBuf,
    },

    /// Measure SNR/PSNR between an original and a modified WAV
    Compare {
        /// Original carrier WAV
        original: PathBuf,

        /// Modified (stego) WAV
        modified: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Embed two layers: steghide, then an in-buffer pass over its output
    LayeredHide {
        /// Carrier WAV file
        carrier: PathBuf,

        /// File for steghide to embed (layer 1)
        payload: PathBuf,

        /// In-buffer message (layer 2)
        #[arg(long)]
        message: String,

        /// Intermediate WAV (layer-1 output; keep it for extraction)
        intermediate: PathBuf,

        /// Final stego WAV
        output: PathBuf,

        /// Steghide password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// End-of-message marker for the in-buffer layer
        #[arg(long, default_value = "#####")]
        marker: String,

        #[command(flatten)]
        technique: TechniqueArgs,
    },

    /// Extract both layers of a layered embedding
    LayeredReveal {
        /// Final stego WAV (layer-2 carrier)
        stego: PathBuf,

        /// Intermediate WAV from layered-hide (layer-1 carrier)
        intermediate: PathBuf,

        /// Where to write the recovered steghide payload
        payload_out: PathBuf,

        /// Steghide password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// End-of-message marker for the in-buffer layer
        #[arg(long, default_value = "#####")]
        marker: String,

        #[command(flatten)]
        technique: TechniqueArgs,
    },

    /// Synthesize a sine-tone demo carrier
    MakeCarrier {
        /// Output WAV file
        output: PathBuf,

        /// Tone frequency in Hz
        #[arg(long, default_value_t = 440.0)]
        freq: f64,

        /// Duration in seconds
        #[arg(long, default_value_t = 10.0)]
        duration: f64,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,

        /// Amplitude relative to full scale
        #[arg(long, default_value_t = 0.5)]
        amplitude: f64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Hide {
            carrier,
            output,
            message,
            input,
            key,
            marker,
            technique,
        } => cmd_hide(&carrier, &output, message, input, key, &marker, &technique),

        Commands::Reveal {
            carrier,
            output,
            key,
            marker,
            technique,
        } => cmd_reveal(&carrier, output, key, &marker, &technique),

        Commands::Encrypt { input, key, output } => cmd_encrypt(&input, &key, output),

        Commands::Decrypt { input, key, output } => cmd_decrypt(&input, &key, output),

        Commands::Keygen { output } => cmd_keygen(&output),

        Commands::Compare {
            original,
            modified,
            json,
        } => cmd_compare(&original, &modified, json),

        Commands::LayeredHide {
            carrier,
            payload,
            message,
            intermediate,
            output,
            password,
            marker,
            technique,
        } => cmd_layered_hide(
            &carrier,
            &payload,
            &message,
            &intermediate,
            &output,
            password,
            &marker,
            &technique,
        ),

        Commands::LayeredReveal {
            stego,
            intermediate,
            payload_out,
            password,
            marker,
            technique,
        } => cmd_layered_reveal(
            &stego,
            &intermediate,
            &payload_out,
            password,
            &marker,
            &technique,
        ),

        Commands::MakeCarrier {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => cmd_make_carrier(&output, freq, duration, sample_rate, amplitude),
    }
}

fn prompt_password(prompt: &str) -> String {
    rpassword::prompt_password(prompt).unwrap_or_else(|_| {
        eprint!("{prompt}");
        io::stderr().flush().unwrap();
        let mut password = String::new();
        io::stdin().read_line(&mut password).unwrap();
        password.trim().to_string()
    })
}

fn read_payload(message: Option<String>, input: Option<PathBuf>) -> Result<Vec<u8>> {
    match (message, input) {
        (Some(text), None) => Ok(text.into_bytes()),
        (None, Some(path)) => {
            std::fs::read(&path).with_context(|| format!("reading payload {}", path.display()))
        }
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
        (Some(_), Some(_)) => unreachable!("clap conflicts_with"),
    }
}

fn cmd_hide(
    carrier_path: &Path,
    output: &Path,
    message: Option<String>,
    input: Option<PathBuf>,
    key: Option<PathBuf>,
    marker: &str,
    technique_args: &TechniqueArgs,
) -> Result<()> {
    let carrier = audio::read(carrier_path)?;
    let technique = technique_args.resolve(carrier.sample_rate());

    let mut payload = read_payload(message, input)?;
    if let Some(key_path) = key {
        let key = crypto::load_key(&key_path)?;
        payload = crypto::seal(&payload, &key)?;
        println!("Payload encrypted ({} bytes with IV and padding)", payload.len());
    }

    let framer = Framer::new(marker.as_bytes());
    let bits = framer.encode(&payload);
    let stego = technique.encode(&carrier, &bits)?;
    audio::write(output, &stego)?;

    let quality = audio::measure(carrier.samples(), stego.samples());
    println!("Embedded {} bytes ({} bits) into {}", payload.len(), bits.len(), output.display());
    println!("  Technique: {technique:?}");
    println!("  SNR:  {:.2} dB", quality.snr_db);
    println!("  PSNR: {:.2} dB", quality.psnr_db);

    Ok(())
}

fn cmd_reveal(
    carrier_path: &Path,
    output: Option<PathBuf>,
    key: Option<PathBuf>,
    marker: &str,
    technique_args: &TechniqueArgs,
) -> Result<()> {
    let carrier = audio::read(carrier_path)?;
    let technique = technique_args.resolve(carrier.sample_rate());
    let framer = Framer::new(marker.as_bytes());

    let mut payload = technique.decode(&carrier, &framer)?;
    if let Some(key_path) = key {
        let key = crypto::load_key(&key_path)?;
        payload = crypto::open(&payload, &key)?;
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &payload)?;
            println!("Recovered {} bytes to {}", payload.len(), path.display());
        }
        None => {
            io::stdout().write_all(&payload)?;
        }
    }

    Ok(())
}

fn cmd_encrypt(input: &Path, key_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let plaintext =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let key = crypto::load_key(key_path)?;

    let blob = crypto::seal(&plaintext, &key)?;
    let output = output.unwrap_or_else(|| append_extension(input, "enc"));
    std::fs::write(&output, &blob)?;

    println!("Encrypted {} -> {} ({} bytes)", input.display(), output.display(), blob.len());
    Ok(())
}

fn cmd_decrypt(input: &Path, key_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let blob = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let key = crypto::load_key(key_path)?;

    let plaintext = crypto::open(&blob, &key)?;
    let output = output.unwrap_or_else(|| swap_or_append_extension(input, "enc", "dec"));
    std::fs::write(&output, &plaintext)?;

    println!("Decrypted {} -> {} ({} bytes)", input.display(), output.display(), plaintext.len());
    Ok(())
}

fn cmd_keygen(output: &Path) -> Result<()> {
    let key = crypto::generate_key();
    crypto::save_key(output, &key)?;

    println!("Wrote 32-byte key to {}", output.display());
    println!("  Fingerprint: {}", hex::encode(&key[..8]));
    Ok(())
}

fn cmd_compare(original: &Path, modified: &Path, json: bool) -> Result<()> {
    let original = audio::read(original)?;
    let modified = audio::read(modified)?;
    let report = audio::measure(original.samples(), modified.samples());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.snr_db.is_infinite() {
        println!("The files are identical. SNR and PSNR are infinite.");
    } else {
        println!("SNR  (Signal-to-Noise Ratio):      {:.2} dB", report.snr_db);
        println!("PSNR (Peak Signal-to-Noise Ratio): {:.2} dB", report.psnr_db);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_layered_hide(
    carrier: &Path,
    payload: &Path,
    message: &str,
    intermediate: &Path,
    output: &Path,
    password: Option<String>,
    marker: &str,
    technique_args: &TechniqueArgs,
) -> Result<()> {
    let password = password.unwrap_or_else(|| prompt_password("Steghide password: "));

    // Echo defaults need the carrier rate before the tool runs.
    let sample_rate = audio::read(carrier)?.sample_rate();
    let technique = technique_args.resolve(sample_rate);

    let tool = Steghide::new();
    let pipeline = LayeredPipeline::new(&tool, technique, Framer::new(marker.as_bytes()));
    pipeline.embed(
        carrier,
        payload,
        &password,
        message.as_bytes(),
        intermediate,
        output,
    )?;

    println!("Layer 1 (steghide): {}", intermediate.display());
    println!("Layer 2 ({technique:?}): {}", output.display());
    println!("Keep both files; extraction needs the intermediate as well.");
    Ok(())
}

fn cmd_layered_reveal(
    stego: &Path,
    intermediate: &Path,
    payload_out: &Path,
    password: Option<String>,
    marker: &str,
    technique_args: &TechniqueArgs,
) -> Result<()> {
    let password = password.unwrap_or_else(|| prompt_password("Steghide password: "));

    let sample_rate = audio::read(stego)?.sample_rate();
    let technique = technique_args.resolve(sample_rate);

    let tool = Steghide::new();
    let pipeline = LayeredPipeline::new(&tool, technique, Framer::new(marker.as_bytes()));
    let inner = pipeline.extract(stego, intermediate, &password, payload_out)?;

    println!("Layer 2 message: {}", String::from_utf8_lossy(&inner));
    println!("Layer 1 payload written to {}", payload_out.display());
    Ok(())
}

fn cmd_make_carrier(
    output: &Path,
    freq: f64,
    duration: f64,
    sample_rate: u32,
    amplitude: f64,
) -> Result<()> {
    if duration <= 0.0 {
        bail!("duration must be positive");
    }

    let carrier = synth::tone(freq, duration, sample_rate, amplitude);
    audio::write(output, &carrier)?;

    println!(
        "Wrote {:.1} s tone ({} Hz, {} samples) to {}",
        duration,
        freq,
        carrier.len(),
        output.display()
    );
    Ok(())
}

/// `file.txt` -> `file.txt.enc`
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{ext}"));
    PathBuf::from(name)
}

/// `file.txt.enc` -> `file.txt.dec`, or append when the extension differs.
fn swap_or_append_extension(path: &Path, from: &str, to: &str) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some(from) {
        path.with_extension(to)
    } else {
        append_extension(path, to)
    }
}
