use kinetype_core::{
    parse_ranges, AnimatedText, Clock, EffectSettings, FrameRecorder, MainMotion, ManualClock,
    Phase, RenderSink, StaggerKind, TextOptions, UnitFrame, Vec2,
};
use std::sync::Arc;

fn text_with(settings: EffectSettings) -> AnimatedText {
    AnimatedText::new(TextOptions::default(), Some(Arc::new(settings))).with_seed(42)
}

fn sequential(delay: f64) -> EffectSettings {
    let mut settings = EffectSettings::default();
    settings.appearance.kind = StaggerKind::Sequentially;
    settings.appearance.delay_between_elements = delay;
    settings
}

/// Runs the text to `end` at 60 fps.
fn run(text: &mut AnimatedText, clock: &mut ManualClock, end: f64) {
    while clock.now() < end {
        text.tick(clock.advance(1.0 / 60.0));
    }
}

#[test]
fn test_phase_entry_times_are_ordered() {
    let mut settings = sequential(0.2);
    settings.delay_before_disappearance = 1.0;
    settings.main.motion = MainMotion::wave();
    let mut clock = ManualClock::new(1000.0);
    let mut text = text_with(settings);
    text.set_text("Hello world", clock.now());
    run(&mut text, &mut clock, 1004.0);

    for animator in text.animators() {
        let appear = animator.phase_entered_at(Phase::Appearing).unwrap();
        let main = animator.phase_entered_at(Phase::Main).unwrap();
        let gone = animator.phase_entered_at(Phase::Disappearing).unwrap();
        assert_eq!(appear, 1000.0);
        assert!(main >= appear, "unit {}: main {} < appear {}", animator.id(), main, appear);
        assert!(gone >= main, "unit {}: gone {} < main {}", animator.id(), gone, main);
    }
    assert!(text.is_finished());
    assert_eq!(text.next_due(), None);
}

#[test]
fn test_sequential_units_appear_in_order() {
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(sequential(0.1));
    text.set_text("abcd", clock.now());

    text.tick(clock.advance(0.15));
    let visible: Vec<bool> = text.frames().iter().map(|f| f.visible).collect();
    assert_eq!(visible, vec![true, true, false, false]);

    text.tick(clock.advance(0.2));
    assert!(text.frames().iter().all(|f| f.visible));
}

#[test]
fn test_out_of_range_units_snap() {
    let mut settings = EffectSettings::default();
    settings.appearance.ranges = parse_ranges(Some("1-2"));
    settings.disappearance.ranges = parse_ranges(Some("1-2"));
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(settings);
    text.set_text("abcd", clock.now());
    text.tick(clock.now());

    let frames = text.frames();
    assert!(frames[0].visible && frames[0].opacity < 1.0);
    assert!(frames[2].visible && frames[2].opacity == 1.0);
    assert!(text.animator(0).unwrap().is_transitioning());
    assert!(!text.animator(2).unwrap().is_transitioning());

    run(&mut text, &mut clock, 5.0);
    for id in 2..4 {
        let history = text.animator(id).unwrap().history();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|c| !c.animated));
    }
    assert!(text.animator(0).unwrap().history().iter().all(|c| c.animated));
}

#[test]
fn test_regeneration_discards_old_tasks() {
    let mut settings = sequential(0.5);
    settings.main.motion = MainMotion::cyclic();
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(settings);
    text.set_text("first text", clock.now());
    text.tick(clock.advance(1.0));
    assert_eq!(text.generation(), 1);

    text.set_text("next", clock.now());
    assert_eq!(text.generation(), 2);
    assert_eq!(text.units().len(), 4);
    for animator in text.animators() {
        assert_eq!(animator.phase(), Phase::Appearing);
        assert_eq!(animator.phase_entered_at(Phase::Appearing), Some(1.0));
    }

    // The first generation had unit 3 appearing at 1.5; the new one has it at 2.5.
    text.tick(clock.advance(0.6));
    let visible: Vec<bool> = text.frames().iter().map(|f| f.visible).collect();
    assert_eq!(visible, vec![true, true, false, false]);
    assert!(text.frames().iter().all(|f| f.offset == Vec2::ZERO || f.visible));
}

#[test]
fn test_same_text_is_noop() {
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(EffectSettings::default());
    text.set_text("same", clock.now());
    text.tick(clock.advance(0.5));
    text.set_text("same", clock.now());
    assert_eq!(text.generation(), 1);
    assert!(text.frames().iter().all(|f| f.visible));
}

#[test]
fn test_disappearance_can_preempt_appearance() {
    let mut settings = sequential(1.0);
    settings.delay_before_disappearance = 2.5;
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(settings);
    text.set_text("abcdef", clock.now());
    run(&mut text, &mut clock, 10.0);

    for id in 0..3 {
        assert!(text.animator(id).unwrap().history()[0].visible);
    }
    for id in 3..6 {
        let animator = text.animator(id).unwrap();
        assert!(animator.history().iter().all(|c| !c.visible), "unit {} was shown", id);
        assert_eq!(animator.phase(), Phase::Disappearing);
    }
}

#[test]
fn test_missing_settings_runs_immediately() {
    let mut clock = ManualClock::new(0.0);
    let mut text = AnimatedText::new(TextOptions::default(), None).with_seed(1);
    text.set_text("hi there", clock.now());
    text.tick(clock.now());
    for animator in text.animators() {
        assert_eq!(animator.phase(), Phase::Disappearing);
        assert_eq!(animator.phase_entered_at(Phase::Disappearing), Some(0.0));
    }
    run(&mut text, &mut clock, 1.0);
    assert!(text.is_finished());
}

#[test]
fn test_main_motion_is_bounded() {
    let mut settings = EffectSettings::default();
    settings.delay_before_disappearance = 10.0;
    settings.main.motion = MainMotion::jumping();
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(settings);
    text.set_text("jump", clock.now());
    run(&mut text, &mut clock, 1.0);

    let frames = text.frames();
    assert!(frames.iter().any(|f| f.offset != Vec2::ZERO));
    for f in &frames {
        assert_eq!(f.offset.x, f.offset.y);
        assert!(f.offset.x.abs() <= 10.0);
        assert!(f.rotation.abs() <= 15.0);
    }
}

#[test]
fn test_relayout_keeps_animation_state() {
    let mut clock = ManualClock::new(0.0);
    let mut text = text_with(EffectSettings::default());
    text.set_text("ab cd", clock.now());
    text.tick(clock.advance(0.5));
    assert_eq!(text.layout().line_count(), 1);

    text.set_container_width(40.0);
    assert_eq!(text.generation(), 1);
    assert!(text.layout().line_count() > 1);
    assert!(text.frames().iter().all(|f| f.visible && f.phase == Phase::Main));
}

#[test]
fn test_render_skips_line_breaks() {
    struct Counting {
        began: usize,
        drawn: Vec<String>,
        ended: usize,
    }
    impl RenderSink for Counting {
        fn begin_frame(&mut self, _size: Vec2) {
            self.began += 1;
        }
        fn draw_unit(&mut self, frame: &UnitFrame) {
            self.drawn.push(frame.text.clone());
        }
        fn end_frame(&mut self) {
            self.ended += 1;
        }
    }

    let mut text = text_with(EffectSettings::default());
    text.set_text("a\nb", 0.0);
    let mut sink = Counting {
        began: 0,
        drawn: Vec::new(),
        ended: 0,
    };
    text.render(&mut sink);
    assert_eq!((sink.began, sink.ended), (1, 1));
    assert_eq!(sink.drawn, vec!["a", "b"]);

    let frames = text.frames();
    assert_eq!(frames[1].line, 1);
    assert!(frames[1].origin.y > frames[0].origin.y);

    let mut recorder = FrameRecorder::default();
    text.render(&mut recorder);
    text.render(&mut recorder);
    assert_eq!(recorder.frames.len(), 2);
    assert_eq!(recorder.frames[0], frames);
}
