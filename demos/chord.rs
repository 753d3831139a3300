//! Play a slowly swelling three-note chord on an output device
//!
//! Run with: cargo run --example chord --features cpal_sink
//!
//! Lists available devices and lets you pick one, then fades in a C major
//! triad with a little vibrato, spread across the stereo field.

use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use wavevox::{
    freq_from_pitch, CpalDevice, Engine, EngineConfig, Oscillator, Role, ShapeId, VoiceId,
};

const CARRIER: ShapeId = ShapeId(1);
const SWELL: ShapeId = ShapeId(2);
const VIBRATO: ShapeId = ShapeId(3);

fn main() -> wavevox::Result<()> {
    tracing_subscriber::fmt::init();

    let devices = CpalDevice::list_outputs();
    if devices.is_empty() {
        eprintln!("No audio output devices found!");
        return Ok(());
    }

    println!("Available audio output devices:");
    for (i, device) in devices.iter().enumerate() {
        println!(
            "  [{}] {} ({}Hz, {} ch)",
            i,
            device.name(),
            device.sample_rate(),
            device.channels()
        );
    }

    print!("\nSelect device [0]: ");
    io::stdout().flush().ok();

    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
    let choice: usize = input.trim().parse().unwrap_or(0);

    let device = match devices.into_iter().nth(choice) {
        Some(device) => device,
        None => {
            println!("Invalid choice, using default device");
            CpalDevice::default_output()?
        }
    };

    println!("\nUsing: {} @ {}Hz", device.name(), device.sample_rate());

    let (engine, renderer) = Engine::new(
        EngineConfig::new(device.sample_rate())
            .with_block_frames(256)
            .with_voices(3)
            .with_shapes(4),
    )?;

    let shapes = engine.shapes();
    shapes.triangle(CARRIER, 2048)?;
    shapes.stage(SWELL, &[0.0, 0.25, 0.5, 0.75, 1.0])?;
    shapes.sine(VIBRATO, 256)?;

    let pitches = [48.0, 52.0, 55.0];
    for (v, pitch) in pitches.iter().enumerate() {
        let voice = VoiceId(v);
        engine.set_oscillator(voice, Role::Wave, Oscillator::new(CARRIER).with_amp(0.3));
        engine.set_oscillator(voice, Role::AmpEnv, Oscillator::new(SWELL));
        engine.set_oscillator(voice, Role::AmpMod, Oscillator::new(ShapeId(0)));
        engine.set_oscillator(voice, Role::IncEnv, Oscillator::new(ShapeId(0)));
        engine.set_oscillator(
            voice,
            Role::IncMod,
            Oscillator::new(VIBRATO).with_amp(0.004).with_shift(1.0),
        );

        engine.set_inc_from_freq(voice, Role::Wave, freq_from_pitch(*pitch));
        engine.set_inc_from_period(voice, Role::AmpEnv, 3.0);
        engine.set_inc_from_freq(voice, Role::IncMod, 5.0 + v as f64 * 0.3);
        engine.set_pan(voice, v as f64 - 1.0);
    }
    engine.enable_voices(VoiceId(0), VoiceId(2));

    let stream = device.open(renderer)?;
    println!("Playing C major chord...");
    println!("Press Ctrl+C to stop\n");

    // hold the chord, then nudge it up a fourth every few seconds
    let mut step = 0.0;
    loop {
        sleep(Duration::from_secs(4));
        step += 5.0;
        for (v, pitch) in pitches.iter().enumerate() {
            engine.set_inc_from_freq_and_restart(VoiceId(v), Role::Wave, freq_from_pitch(pitch + step % 24.0));
        }
        if step >= 120.0 {
            break;
        }
    }

    stream.pause()?;
    Ok(())
}
