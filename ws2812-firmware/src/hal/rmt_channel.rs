// RMT Pulse-Kanal
//
// Implementiert den PulseChannel-Trait aus ws2812-core über esp-hal's RMT.
// Der Encoder füllt einen Frame-Puffer, `wait_all_done` sendet ihn als
// eine Single-Shot Übertragung und blockiert bis zum Ende.

use defmt::{debug, trace, warn};
use esp_hal::Blocking;
use esp_hal::gpio::Level;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::rmt::{Channel, PulseCode, Tx, TxChannelConfig, TxChannelCreator};
use esp_hal::time::{Duration, Instant};
use ws2812_core::{ChannelConfig, DrainTimeout, LedError, PulseChannel, PulseSymbol};

use crate::config::RMT_SYMBOLS_PER_BLOCK;

// Frame-Puffer: 64 Symbole (wie mem_block_symbols), reicht für 3 Bytes + Reset
const FRAME_CAPACITY: usize = 64;

/// RMT Sendekanal für WS2812 Frames
pub struct RmtPulseChannel<'ch> {
    channel: Channel<'ch, Blocking, Tx>,
    frame: [PulseCode; FRAME_CAPACITY],
    len: usize,
    /// Letztes Symbol im Puffer hat eine Dauer 0 (= End-Marker)
    terminated: bool,
    enabled: bool,
    invert: bool,
}

impl<'ch> RmtPulseChannel<'ch> {
    /// Konfiguriert einen RMT Kanal als Sender
    ///
    /// # Parameter
    /// - `creator`: RMT Kanal (z.B. `rmt.channel0`)
    /// - `pin`: GPIO für die Datenleitung
    /// - `clk_divider`: Teiler vom RMT Quell-Takt auf die Tick-Frequenz
    /// - `config`: Puffergröße und Leerlauf-Pegel
    pub fn new<C, O>(
        creator: C,
        pin: O,
        clk_divider: u8,
        config: &ChannelConfig,
    ) -> Result<Self, LedError>
    where
        C: TxChannelCreator<'ch, Blocking>,
        O: PeripheralOutput<'ch>,
    {
        let blocks = config.mem_block_symbols.div_ceil(RMT_SYMBOLS_PER_BLOCK);
        let memsize = u8::try_from(blocks).map_err(|_| LedError::ChannelConfig)?;

        let tx_config = TxChannelConfig::default()
            .with_clk_divider(clk_divider)
            .with_idle_output_level(Level::from(config.idle_level_high))
            .with_idle_output(true)
            .with_carrier_modulation(false)
            .with_memsize(memsize);

        let channel = creator
            .configure_tx(&tx_config)
            .map_err(|_| LedError::ChannelConfig)?
            .with_pin(pin);
        debug!(
            "RMT: divider {}, {} memory blocks, idle {}",
            clk_divider,
            memsize,
            if config.idle_level_high { "high" } else { "low" }
        );
        // Blocking Single-Shot: esp-hal kennt weder Queue-Tiefe noch Interrupt-Priorität
        debug!(
            "RMT: queue depth {} and interrupt priority {} not applied",
            config.queue_depth, config.interrupt_priority
        );

        Ok(Self {
            channel,
            frame: [PulseCode::end_marker(); FRAME_CAPACITY],
            len: 0,
            terminated: false,
            enabled: false,
            invert: config.invert_output,
        })
    }

    fn to_pulse_code(&self, symbol: &PulseSymbol) -> PulseCode {
        PulseCode::new(
            Level::from(symbol.high_level != self.invert),
            symbol.high_ticks,
            Level::from(symbol.low_level != self.invert),
            symbol.low_ticks,
        )
    }
}

impl PulseChannel for RmtPulseChannel<'_> {
    fn enable(&mut self) -> Result<(), LedError> {
        self.len = 0;
        self.terminated = false;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), LedError> {
        self.len = 0;
        self.terminated = false;
        self.enabled = false;
        Ok(())
    }

    fn free_symbols(&self) -> usize {
        if self.enabled {
            // ein Slot bleibt für einen eventuellen End-Marker reserviert
            FRAME_CAPACITY.saturating_sub(self.len + 1)
        } else {
            0
        }
    }

    fn queue(&mut self, symbols: &[PulseSymbol]) -> Result<(), LedError> {
        if !self.enabled {
            return Err(LedError::Transmit);
        }
        let end = self.len + symbols.len();
        if end > FRAME_CAPACITY {
            return Err(LedError::Transmit);
        }
        for (index, symbol) in (self.len..end).zip(symbols) {
            let code = self.to_pulse_code(symbol);
            if let Some(slot) = self.frame.get_mut(index) {
                *slot = code;
            }
        }
        self.len = end;
        // Reset-Symbol hat zweite Dauer 0 und beendet damit die Übertragung
        if let Some(last) = symbols.last() {
            self.terminated = last.high_ticks == 0 || last.low_ticks == 0;
        }
        Ok(())
    }

    fn wait_for_space(&mut self, needed: usize) -> Result<(), LedError> {
        // Frame-Puffer wird erst in wait_all_done gesendet, Platz entsteht vorher nie
        warn!("RMT: {} symbols requested, {} free", needed, self.free_symbols());
        Err(LedError::QueueStalled)
    }

    fn wait_all_done(&mut self, timeout: DrainTimeout) -> Result<(), LedError> {
        if !self.terminated {
            let marker = self.frame.get_mut(self.len).ok_or(LedError::Transmit)?;
            *marker = PulseCode::end_marker();
            self.len += 1;
            self.terminated = true;
        }
        let frame = self.frame.get(..self.len).ok_or(LedError::Transmit)?;
        trace!("RMT: transmitting {} pulse codes", frame.len());

        let started = Instant::now();
        let transaction = self
            .channel
            .reborrow()
            .transmit(frame)
            .map_err(|(_, _)| LedError::Transmit)?;
        transaction.wait().map_err(|(_, _)| LedError::WriteFailed)?;
        self.len = 0;
        self.terminated = false;

        // Blocking-Wait kennt keinen Timeout, Überschreitung wird danach gemeldet
        match timeout {
            DrainTimeout::Forever => Ok(()),
            DrainTimeout::Millis(ms) => {
                if started.elapsed() > Duration::from_millis(u64::from(ms)) {
                    Err(LedError::DrainTimeout)
                } else {
                    Ok(())
                }
            }
        }
    }
}
