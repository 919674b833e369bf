//! PWM tone output for the piezo buzzer

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use vigil_drivers::buzzer::ToneOutput;

/// Clock divider; keeps `top` within 16 bits down to ~30 Hz at 125 MHz
const PWM_DIVIDER: u8 = 64;

/// Square wave on one PWM channel A output
pub struct PwmTone {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmTone {
    /// Take over a PWM slice, starting silent
    pub fn new(pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = PWM_DIVIDER.into();
        config.compare_a = 0;

        let mut tone = Self { pwm, config };
        tone.pwm.set_config(&tone.config);
        tone
    }
}

impl ToneOutput for PwmTone {
    fn set_tone(&mut self, frequency_hz: u16) {
        let counter_hz = clk_sys_freq() / PWM_DIVIDER as u32;
        let top = (counter_hz / frequency_hz.max(1) as u32).saturating_sub(1);
        let top = top.min(u16::MAX as u32) as u16;

        self.config.top = top;
        // 50% duty
        self.config.compare_a = top / 2 + 1;
        self.pwm.set_config(&self.config);
    }

    fn silence(&mut self) {
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}
