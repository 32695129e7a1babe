//! Web Audio glue for the Live Tutor (browser only).
//!
//! ARCHITECTURE
//! ============
//! [`Capture`] opens the microphone on a 16 kHz `AudioContext` and hands each
//! 4096-sample block of channel 0 to a callback. [`Playback`] owns a 24 kHz
//! context with one gain node and queues decoded PCM16 chunks on the
//! `voice::PlaybackScheduler` cursor so they play back-to-back.
//!
//! LIFECYCLE
//! =========
//! Both halves are torn down explicitly (`stop` / `close`) by the live
//! session. The scheduler and the pending source map live behind one
//! `Rc<RefCell<_>>`; `ended` callbacks hold a weak reference so a closed
//! playback is not kept alive by sources still draining.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use voice::{PlaybackScheduler, pcm};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AudioBufferSourceNode, AudioContext, AudioContextOptions, AudioProcessingEvent, GainNode, MediaStream,
    MediaStreamAudioSourceNode, MediaStreamConstraints, MediaStreamTrack, ScriptProcessorNode,
};

use super::browser::js_error;

#[allow(clippy::cast_precision_loss)]
fn context_at(sample_rate: u32) -> Result<AudioContext, String> {
    let options = AudioContextOptions::new();
    options.set_sample_rate(sample_rate as f32);
    AudioContext::new_with_context_options(&options).map_err(|e| js_error(&e))
}

// =============================================================================
// CAPTURE
// =============================================================================

/// Live microphone capture.
pub struct Capture {
    context: AudioContext,
    stream: MediaStream,
    source: MediaStreamAudioSourceNode,
    processor: ScriptProcessorNode,
    _on_process: Closure<dyn FnMut(AudioProcessingEvent)>,
}

impl Capture {
    /// Ask for the microphone and start delivering blocks to `on_block`.
    ///
    /// # Errors
    ///
    /// Returns an error string if permission is denied or the audio graph
    /// cannot be built.
    pub async fn start(mut on_block: impl FnMut(&[f32]) + 'static) -> Result<Self, String> {
        let window = web_sys::window().ok_or("no window")?;
        let devices = window.navigator().media_devices().map_err(|e| js_error(&e))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| js_error(&e))?;
        let stream: MediaStream = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| js_error(&e))?
            .dyn_into()
            .map_err(|e| js_error(&e))?;

        let context = context_at(voice::INPUT_SAMPLE_RATE)?;
        let source = context.create_media_stream_source(&stream).map_err(|e| js_error(&e))?;
        let processor = context
            .create_script_processor_with_buffer_size_and_number_of_input_channels_and_number_of_output_channels(
                voice::CAPTURE_BLOCK_SIZE,
                1,
                1,
            )
            .map_err(|e| js_error(&e))?;

        let on_process = Closure::<dyn FnMut(AudioProcessingEvent)>::new(move |ev: AudioProcessingEvent| {
            let Ok(buffer) = ev.input_buffer() else {
                return;
            };
            if let Ok(samples) = buffer.get_channel_data(0) {
                on_block(&samples);
            }
        });
        processor.set_onaudioprocess(Some(on_process.as_ref().unchecked_ref()));
        source.connect_with_audio_node(&processor).map_err(|e| js_error(&e))?;
        processor
            .connect_with_audio_node(&context.destination())
            .map_err(|e| js_error(&e))?;

        Ok(Self { context, stream, source, processor, _on_process: on_process })
    }

    /// Detach the processor, release the microphone, and close the context.
    pub fn stop(self) {
        self.processor.set_onaudioprocess(None);
        let _ = self.processor.disconnect();
        let _ = self.source.disconnect();
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        let _ = self.context.close();
    }
}

// =============================================================================
// PLAYBACK
// =============================================================================

#[derive(Default)]
struct Queue {
    scheduler: PlaybackScheduler,
    sources: HashMap<u64, AudioBufferSourceNode>,
}

/// Gap-free playback of returned tutor audio.
pub struct Playback {
    context: AudioContext,
    gain: GainNode,
    queue: Rc<RefCell<Queue>>,
}

impl Playback {
    /// # Errors
    ///
    /// Returns an error string if the output context cannot be created.
    pub fn new() -> Result<Self, String> {
        let context = context_at(voice::OUTPUT_SAMPLE_RATE)?;
        let gain = context.create_gain().map_err(|e| js_error(&e))?;
        gain.connect_with_audio_node(&context.destination())
            .map_err(|e| js_error(&e))?;
        Ok(Self { context, gain, queue: Rc::new(RefCell::new(Queue::default())) })
    }

    /// Queue one PCM16 chunk after everything already scheduled.
    ///
    /// # Errors
    ///
    /// Returns an error string if the buffer or source cannot be created.
    #[allow(clippy::cast_precision_loss)]
    pub fn play(&self, bytes: &[u8], sample_rate: u32) -> Result<(), String> {
        let mut samples = pcm::decode_pcm16(bytes);
        if samples.is_empty() {
            return Ok(());
        }
        let frames = u32::try_from(samples.len()).map_err(|e| e.to_string())?;
        let buffer = self
            .context
            .create_buffer(1, frames, sample_rate as f32)
            .map_err(|e| js_error(&e))?;
        buffer.copy_to_channel(&mut samples, 0).map_err(|e| js_error(&e))?;

        let source = self.context.create_buffer_source().map_err(|e| js_error(&e))?;
        source.set_buffer(Some(&buffer));
        source.connect_with_audio_node(&self.gain).map_err(|e| js_error(&e))?;

        let chunk = self
            .queue
            .borrow_mut()
            .scheduler
            .schedule(self.context.current_time(), buffer.duration());

        let weak = Rc::downgrade(&self.queue);
        let id = chunk.id;
        let on_ended = Closure::once_into_js(move || {
            if let Some(queue) = weak.upgrade() {
                let mut queue = queue.borrow_mut();
                queue.scheduler.ended(id);
                queue.sources.remove(&id);
            }
        });
        source.set_onended(Some(on_ended.unchecked_ref()));
        if let Err(err) = source.start_with_when(chunk.start) {
            self.queue.borrow_mut().scheduler.cancel(chunk);
            return Err(js_error(&err));
        }
        self.queue.borrow_mut().sources.insert(id, source);
        Ok(())
    }

    /// Stop every pending source and reset the cursor.
    pub fn interrupt(&self) {
        let mut queue = self.queue.borrow_mut();
        for id in queue.scheduler.interrupt() {
            if let Some(source) = queue.sources.remove(&id) {
                let _ = source.stop();
            }
        }
    }

    pub fn close(self) {
        self.interrupt();
        let _ = self.gain.disconnect();
        let _ = self.context.close();
    }
}
