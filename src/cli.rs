use sqcodec::analysis::separation::{analyze_stereo, SeparationReport};
use sqcodec::io::wav;
use sqcodec::signal;
use sqcodec::{AudioFrame, MatrixParams, SqDecoder, SqEncoder};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "encode" => run_encode(&args[2..]),
        "decode" => run_decode(&args[2..]),
        "analyze" => run_analyze(&args[2..]),
        "generate-test" => run_generate_test(&args[2..]),
        "--help" | "-h" | "help" => print_usage(),
        // Decode is the default subcommand: treat the first argument as its
        // input file.
        _ => run_decode(&args[1..]),
    }
}

/// Options shared by the encode and decode subcommands.
struct CodecOptions {
    input: String,
    output: String,
    params: MatrixParams,
    float32: bool,
    verbose: bool,
}

fn parse_codec_options(args: &[String], subcommand: &str) -> CodecOptions {
    let mut positional: Vec<&String> = Vec::new();
    let mut block_size: usize = 1024;
    let mut overlap: Option<usize> = None;
    let mut logic = false;
    let mut float32 = false;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--block-size" | "-b" => {
                i += 1;
                block_size = parse_usize(args, i, "block-size");
            }
            "--overlap" | "-o" => {
                i += 1;
                overlap = Some(parse_usize(args, i, "overlap"));
            }
            "--logic" => logic = true,
            "--float32" => float32 = true,
            "--verbose" | "-v" => verbose = true,
            other if other.starts_with('-') => {
                eprintln!("ERROR: Unknown option '{}'", other);
                print_usage();
                std::process::exit(1);
            }
            _ => positional.push(&args[i]),
        }
        i += 1;
    }

    if positional.len() != 2 {
        eprintln!(
            "ERROR: {} requires <input.wav> and <output.wav>",
            subcommand
        );
        print_usage();
        std::process::exit(1);
    }

    let mut params = MatrixParams::new()
        .with_block_size(block_size)
        .with_logic_steering(logic);
    if let Some(o) = overlap {
        params = params.with_overlap(o);
    }

    CodecOptions {
        input: positional[0].clone(),
        output: positional[1].clone(),
        params,
        float32,
        verbose,
    }
}

fn run_encode(args: &[String]) {
    let opts = parse_codec_options(args, "encode");

    let quad = read_or_die(&opts.input, 4);
    report_input(&opts, &quad);

    let encoder = match SqEncoder::new(&opts.params) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let start = std::time::Instant::now();
    let stereo = match encoder.process(&quad) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: Encoding failed: {}", e);
            std::process::exit(1);
        }
    };
    report_timing(&opts, start, &quad);

    write_or_die(&opts, &stereo);
}

fn run_decode(args: &[String]) {
    let opts = parse_codec_options(args, "decode");

    let stereo = read_or_die(&opts.input, 2);
    report_input(&opts, &stereo);

    let decoder = match SqDecoder::new(&opts.params) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let start = std::time::Instant::now();
    let quad = match decoder.process(&stereo) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("ERROR: Decoding failed: {}", e);
            std::process::exit(1);
        }
    };
    report_timing(&opts, start, &stereo);

    write_or_die(&opts, &quad);
}

fn run_analyze(args: &[String]) {
    let mut positional: Vec<&String> = Vec::new();
    let mut block_size: usize = 1024;
    let mut overlap: Option<usize> = None;
    let mut logic = false;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--block-size" | "-b" => {
                i += 1;
                block_size = parse_usize(args, i, "block-size");
            }
            "--overlap" | "-o" => {
                i += 1;
                overlap = Some(parse_usize(args, i, "overlap"));
            }
            "--logic" => logic = true,
            "--json" => json = true,
            other if other.starts_with('-') => {
                eprintln!("ERROR: Unknown option '{}'", other);
                std::process::exit(1);
            }
            _ => positional.push(&args[i]),
        }
        i += 1;
    }

    if positional.len() != 1 {
        eprintln!("ERROR: analyze requires exactly one <input.wav>");
        print_usage();
        std::process::exit(1);
    }

    let mut params = MatrixParams::new()
        .with_block_size(block_size)
        .with_logic_steering(logic);
    if let Some(o) = overlap {
        params = params.with_overlap(o);
    }

    let stereo = read_or_die(positional[0], 2);
    let report = match analyze_stereo(&stereo, &params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: Analysis failed: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        print_report_json(&report);
    } else {
        print!("{}", report);
    }
}

fn print_report_json(report: &SeparationReport) {
    match serde_json::to_string_pretty(report) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("ERROR: Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_generate_test(args: &[String]) {
    let mut positional: Vec<&String> = Vec::new();
    let mut seconds = 2.0f64;
    let mut rate: u32 = 44100;
    let mut channels: usize = 4;
    let mut float32 = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seconds" | "-s" => {
                i += 1;
                seconds = parse_f64(args, i, "seconds");
            }
            "--rate" | "-r" => {
                i += 1;
                rate = parse_usize(args, i, "rate") as u32;
            }
            "--channels" | "-c" => {
                i += 1;
                channels = parse_usize(args, i, "channels");
            }
            "--float32" => float32 = true,
            other if other.starts_with('-') => {
                eprintln!("ERROR: Unknown option '{}'", other);
                std::process::exit(1);
            }
            _ => positional.push(&args[i]),
        }
        i += 1;
    }

    if positional.len() != 1 {
        eprintln!("ERROR: generate-test requires exactly one <output.wav>");
        print_usage();
        std::process::exit(1);
    }
    if seconds <= 0.0 || rate == 0 {
        eprintln!("ERROR: seconds and rate must be positive");
        std::process::exit(1);
    }

    let frame = match channels {
        2 => signal::stereo_test_frame(rate, seconds),
        4 => signal::quad_test_frame(rate, seconds),
        n => {
            eprintln!("ERROR: channels must be 2 or 4, got {}", n);
            std::process::exit(1);
        }
    };

    let result = if float32 {
        wav::write_wav_file_float32(positional[0], &frame)
    } else {
        wav::write_wav_file_pcm16(positional[0], &frame)
    };
    if let Err(e) = result {
        eprintln!("ERROR: Failed to write {}: {}", positional[0], e);
        std::process::exit(1);
    }

    eprintln!(
        "Generated {} ({} channels, {:.2}s at {} Hz)",
        positional[0], channels, seconds, rate
    );
}

fn read_or_die(path: &str, channels: usize) -> AudioFrame {
    match wav::read_wav_file(path, channels) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn write_or_die(opts: &CodecOptions, frame: &AudioFrame) {
    let result = if opts.float32 {
        wav::write_wav_file_float32(&opts.output, frame)
    } else {
        wav::write_wav_file_pcm16(&opts.output, frame)
    };
    if let Err(e) = result {
        eprintln!("ERROR: Failed to write {}: {}", opts.output, e);
        std::process::exit(1);
    }
    eprintln!("Written to {}", opts.output);
}

fn report_input(opts: &CodecOptions, frame: &AudioFrame) {
    eprintln!(
        "Input: {} samples, {} Hz, {} channels, {:.2}s",
        frame.num_samples,
        frame.sample_rate,
        frame.num_channels(),
        frame.duration_secs()
    );
    if opts.verbose {
        eprintln!(
            "  Block size: {}, overlap: {}, hop: {}",
            opts.params.block_size,
            opts.params.overlap,
            opts.params.block_size - opts.params.overlap
        );
        eprintln!("  Codec latency: {} samples", opts.params.codec_latency());
        eprintln!("  Logic steering: {}", opts.params.logic_steering);
        eprintln!(
            "  Output format: {}",
            if opts.float32 { "float32" } else { "PCM16" }
        );
    }
}

fn report_timing(opts: &CodecOptions, start: std::time::Instant, frame: &AudioFrame) {
    if !opts.verbose {
        return;
    }
    let secs = start.elapsed().as_secs_f64();
    let audio_secs = frame.duration_secs();
    eprintln!(
        "Processing time: {:.3}s ({:.1}x realtime)",
        secs,
        if secs > 0.0 { audio_secs / secs } else { f64::INFINITY }
    );
}

fn print_usage() {
    eprintln!("Usage: sqcodec-cli <subcommand> [options]");
    eprintln!();
    eprintln!("Subcommands:");
    eprintln!("  encode <in.wav> <out.wav>    4-channel WAV -> SQ stereo WAV");
    eprintln!("  decode <in.wav> <out.wav>    SQ stereo WAV -> 4-channel WAV (default)");
    eprintln!("  analyze <in.wav>             Decode and report channel separation");
    eprintln!("  generate-test <out.wav>      Write a multitone test WAV");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --block-size, -b <N>  FFT block size, power of two (default: 1024)");
    eprintln!("  --overlap, -o <N>     Block overlap (default: block size / 2)");
    eprintln!("  --logic               Enable gain-steering post-filter on decode");
    eprintln!("  --float32             Write 32-bit float output (default: 16-bit PCM)");
    eprintln!("  --json                Emit the analyze report as JSON");
    eprintln!("  --verbose, -v         Show processing parameters and timing");
    eprintln!();
    eprintln!("generate-test options:");
    eprintln!("  --seconds, -s <f>     Duration (default: 2.0)");
    eprintln!("  --rate, -r <N>        Sample rate (default: 44100)");
    eprintln!("  --channels, -c <N>    2 or 4 (default: 4)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  sqcodec-cli encode quad.wav stereo.wav");
    eprintln!("  sqcodec-cli decode stereo.wav quad.wav --logic");
    eprintln!("  sqcodec-cli stereo.wav quad.wav -b 2048 -v");
    eprintln!("  sqcodec-cli analyze stereo.wav --json");
    eprintln!("  sqcodec-cli generate-test quad.wav --seconds 4");
}

fn parse_usize(args: &[String], idx: usize, name: &str) -> usize {
    if idx >= args.len() {
        eprintln!("ERROR: --{} requires a value", name);
        std::process::exit(1);
    }
    match args[idx].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, args[idx]);
            std::process::exit(1);
        }
    }
}

fn parse_f64(args: &[String], idx: usize, name: &str) -> f64 {
    if idx >= args.len() {
        eprintln!("ERROR: --{} requires a value", name);
        std::process::exit(1);
    }
    match args[idx].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, args[idx]);
            std::process::exit(1);
        }
    }
}
