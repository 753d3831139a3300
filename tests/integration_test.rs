use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use wavevox::{
    pan_factors, Engine, EngineConfig, OscField, OscParam, Oscillator, Renderer, Role, ShapeId,
    Voice, VoiceId,
};

const CONST_SHAPE: ShapeId = ShapeId(1);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn engine(voices: usize, block_frames: usize) -> (Engine, Renderer) {
    init_tracing();
    Engine::new(
        EngineConfig::new(48_000)
            .with_voices(voices)
            .with_block_frames(block_frames)
            .with_shapes(4),
    )
    .unwrap()
}

/// Enabled voice whose carrier reads slot 1; every other oscillator reads the untouched slot 0.
fn constant_voice(pan: f64) -> Voice {
    let mut voice = Voice::default();
    for role in Role::ALL {
        voice[role] = Oscillator::new(ShapeId(0));
    }
    voice[Role::Wave] = Oscillator::new(CONST_SHAPE).with_inc(0.013);
    voice.pan = pan;
    voice.enabled = true;
    voice
}

fn render(renderer: &mut Renderer) -> Vec<f32> {
    let mut out = vec![0.0; renderer.block_len()];
    renderer.render(&mut out);
    out
}

#[test]
fn disabled_voices_contribute_nothing() {
    let (engine, mut renderer) = engine(4, 64);
    engine.shapes().sine(ShapeId(2), 512).unwrap();
    for v in 0..4 {
        let mut voice = constant_voice(0.3);
        voice[Role::Wave] = Oscillator::new(ShapeId(2)).with_inc(0.01);
        voice.enabled = false;
        engine.set_voice(VoiceId(v), voice);
    }
    assert!(render(&mut renderer).iter().all(|&s| s == 0.0));

    // a single enabled voice sounds the same whatever the disabled ones hold
    engine.enable_voice(VoiceId(2));
    let with_others = render(&mut renderer);

    let (solo, mut solo_renderer) = engine_with_one(&engine, VoiceId(2));
    let alone = render(&mut solo_renderer);
    drop(solo);
    assert_eq!(with_others, alone);
}

/// Fresh single-voice engine holding a restarted copy of voice `id` of `source`.
fn engine_with_one(source: &Engine, id: VoiceId) -> (Engine, Renderer) {
    let (engine, renderer) = engine(1, 64);
    engine.shapes().sine(ShapeId(2), 512).unwrap();
    let mut voice = source.voice(id);
    voice.restart();
    engine.set_voice(VoiceId(0), voice);
    (engine, renderer)
}

#[test]
fn volume_normalizes_by_enabled_count() {
    let s = 0.6f32;
    let (engine, mut renderer) = engine(3, 32);
    engine.shapes().stage(CONST_SHAPE, &[s]).unwrap();

    engine.set_voice(VoiceId(0), constant_voice(0.0));
    engine.set_voice(VoiceId(1), constant_voice(0.0));
    let out = render(&mut renderer);
    let (left, right) = pan_factors(0.0);
    for frame in out.chunks_exact(2) {
        assert!((frame[0] as f64 - s as f64 * left).abs() < 1e-6);
        assert!((frame[1] as f64 - s as f64 * right).abs() < 1e-6);
    }

    engine.disable_voice(VoiceId(1));
    engine.set_pan(VoiceId(0), 1.0);
    engine.set_global_volume(0.5);
    let out = render(&mut renderer);
    for frame in out.chunks_exact(2) {
        assert!(frame[0].abs() < 1e-7);
        assert!((frame[1] - 0.5 * s).abs() < 1e-6);
    }
}

#[test]
fn staged_shapes_wait_for_commit() {
    let (engine, mut renderer) = engine(1, 16);
    engine.set_voice(VoiceId(0), constant_voice(-1.0));

    // slot 1 still holds its initial single 1.0 sample
    engine.shapes().stage(CONST_SHAPE, &[0.25, 0.25]).unwrap();
    assert_eq!(engine.shape_len(CONST_SHAPE), 1);
    assert_eq!(renderer.read(CONST_SHAPE, 0.5), 1.0);

    {
        let _held = engine.shapes().lock(CONST_SHAPE);
        let out = render(&mut renderer);
        assert!(out.chunks_exact(2).all(|f| f[0] == 1.0));
        assert_eq!(renderer.table_len(CONST_SHAPE), 1);
    }

    assert!(engine.shapes().is_pending(CONST_SHAPE));
    let out = render(&mut renderer);
    assert!(out.chunks_exact(2).all(|f| f[0] == 0.25));
    assert_eq!(engine.shape_len(CONST_SHAPE), 2);
    assert!(!engine.shapes().is_pending(CONST_SHAPE));
}

#[test]
fn generated_shapes_render_as_expected() {
    let (engine, mut renderer) = engine(1, 16);
    engine.shapes().sine(ShapeId(2), 4).unwrap();
    engine.shapes().pulse(ShapeId(3), 10, 0.3).unwrap();
    renderer.commit_pending();

    // sample centres, so truncation lands on each index
    let sine: Vec<f32> = (0..4).map(|i| renderer.read(ShapeId(2), (i as f64 + 0.5) / 4.0)).collect();
    let expected = [0.0, 1.0, 0.0, -1.0];
    for (got, want) in sine.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "{sine:?}");
    }

    let pulse: Vec<f32> = (0..10).map(|i| renderer.read(ShapeId(3), (i as f64 + 0.5) / 10.0)).collect();
    assert_eq!(pulse, [1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0]);
}

#[test]
fn amp_envelope_clamps_at_end() {
    let (engine, mut renderer) = engine(1, 8);
    engine.shapes().stage(ShapeId(2), &[0.0, 1.0]).unwrap();
    let v = VoiceId(0);
    engine.set_voice(v, constant_voice(-1.0));
    engine.set_oscillator(v, Role::AmpEnv, Oscillator::new(ShapeId(2)).with_inc(0.2));

    let out = render(&mut renderer);
    let lefts: Vec<f32> = out.chunks_exact(2).map(|f| f[0]).collect();
    // envelope reads 0 until its phase passes the midpoint, then holds at 1
    assert_eq!(lefts, [0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    assert_eq!(engine.osc_field(v, Role::AmpEnv, OscField::Pos), 1.0);
}

#[test]
fn wave_phase_tracks_frequency() {
    let (engine, mut renderer) = engine(1, 256);
    engine.shapes().saw(ShapeId(2), 480).unwrap();
    let v = VoiceId(0);
    engine.set_voice(v, constant_voice(0.0));
    engine.set_param(v, Role::Wave, OscParam::Shape(ShapeId(2)));
    engine.set_param(v, Role::Wave, OscParam::Pos(0.0));
    // 100 Hz at 48 kHz: one cycle per 480 frames
    engine.set_inc_from_freq(v, Role::Wave, 100.0);

    render(&mut renderer);
    let pos = engine.osc_field(v, Role::Wave, OscField::Pos);
    assert!((pos - 256.0 / 480.0).abs() < 1e-9);
}

#[test]
fn tuning_does_not_wait_on_held_shape() {
    let (engine, mut renderer) = engine(1, 64);
    engine.set_voice(VoiceId(0), constant_voice(-1.0));
    engine.shapes().stage(CONST_SHAPE, &[0.5; 100]).unwrap();

    let held = engine.shapes().lock(CONST_SHAPE);

    let (done_tx, done_rx) = mpsc::channel();
    let tuner = engine.clone();
    thread::spawn(move || {
        tuner.set_inc_from_freq(VoiceId(0), Role::Wave, 480.0);
        done_tx.send(()).unwrap();
    });
    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("retuning stalled behind the shape guard");

    // commit skips the held slot, so the voice still plays the old table
    let out = render(&mut renderer);
    assert!(out.chunks_exact(2).all(|f| f[0] == 1.0));
    drop(held);

    // 480 Hz over the staged 100 samples at 48 kHz
    let inc = engine.osc_field(VoiceId(0), Role::Wave, OscField::Inc);
    assert!((inc - 0.01).abs() < 1e-12);

    let out = render(&mut renderer);
    assert!(out.chunks_exact(2).all(|f| f[0] == 0.5));
}

#[test]
fn control_threads_race_renderer() {
    let (engine, mut renderer) = engine(8, 64);
    engine.shapes().sine(ShapeId(2), 1024).unwrap();
    for v in 0..8 {
        let mut voice = constant_voice(0.0);
        voice[Role::Wave] = Oscillator::new(ShapeId(2));
        engine.set_voice(VoiceId(v), voice);
        engine.set_inc_from_freq(VoiceId(v), Role::Wave, 110.0 * (v + 1) as f64);
    }

    let done = Arc::new(AtomicBool::new(false));
    let mut workers = Vec::new();

    for t in 0..3 {
        let engine = engine.clone();
        let done = done.clone();
        workers.push(thread::spawn(move || {
            let mut i = 0usize;
            while !done.load(Ordering::Relaxed) {
                let v = VoiceId((i + t) % 8);
                match i % 6 {
                    0 => engine.set_pan(v, ((i % 21) as f64 - 10.0) / 10.0),
                    1 => engine.disable_voices(VoiceId(0), VoiceId(3)),
                    2 => engine.enable_voices(VoiceId(0), VoiceId(7)),
                    3 => engine.scale_fields(VoiceId(4), VoiceId(7), Role::Wave, OscField::Amp, 1.0),
                    4 => engine.set_global_volume(0.5 + (i % 2) as f64 * 0.5),
                    _ => engine.restart_voice(v),
                }
                if i % 50 == 0 {
                    let len = 256 + (i % 7) * 64;
                    engine.shapes().triangle(ShapeId(3), len).unwrap();
                    engine.set_param(v, Role::AmpMod, OscParam::Shape(ShapeId(3)));
                }
                i += 1;
            }
        }));
    }

    let mut out = vec![0.0; renderer.block_len()];
    for _ in 0..500 {
        renderer.render(&mut out);
        // sines and triangles scaled by at most unity volume over >= 1 voice
        assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0 + 1e-6));
    }

    done.store(true, Ordering::Relaxed);
    for worker in workers {
        worker.join().unwrap();
    }

    renderer.commit_pending();
    assert!(!engine.shapes().is_pending(ShapeId(3)));
    assert_eq!(engine.shape_len(ShapeId(3)), renderer.table_len(ShapeId(3)));
}

#[test]
#[should_panic(expected = "out of range")]
fn out_of_range_voice_fails_fast() {
    let (engine, _renderer) = engine(2, 16);
    engine.set_pan(VoiceId(2), 0.0);
}
