// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer pipeline delivering RGBA preview frames

use super::super::types::{
    BackendError, BackendResult, CameraDevice, CameraFrame, FrameOutlet, FrameSender, PushResult,
    pack_rgba_rows,
};
use super::super::CaptureStream;
use super::{bool_error, enumeration};
use crate::constants::pipeline;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Display name used when the backend picks the device
const DEFAULT_DEVICE_NAME: &str = "Default Camera";

/// A playing capture pipeline
///
/// The source element is the device track; stopping the stream sets it and
/// then the whole pipeline to `NULL`, which closes the device. An error or
/// end-of-stream on the bus closes the frame outlet, so the consumer sees
/// the stream end even while the pipeline object is still alive.
pub struct GstCaptureStream {
    pipeline: gstreamer::Pipeline,
    outlet: FrameOutlet,
    tracks: Vec<gstreamer::Element>,
    device_name: String,
    stopped: bool,
}

impl GstCaptureStream {
    /// Build the pipeline for `device` and set it to PLAYING
    pub fn open(device: Option<&CameraDevice>, frames: FrameSender) -> BackendResult<Self> {
        gstreamer::init().map_err(|e| BackendError::InitializationFailed(e.to_string()))?;

        let (source, device_name) = match device {
            Some(camera) => {
                info!(device = %camera, "Creating camera source");
                let gst_device = enumeration::find_device(camera)
                    .ok_or_else(|| BackendError::DeviceNotFound(camera.name.clone()))?;
                let source = gst_device
                    .create_element(Some("source"))
                    .map_err(|e| bool_error("Failed to create device source", e))?;
                (source, camera.name.clone())
            }
            None => {
                info!("Creating default camera source");
                let source = gstreamer::ElementFactory::make("autovideosrc")
                    .name("source")
                    .build()
                    .map_err(|e| bool_error("autovideosrc not available", e))?;
                (source, DEFAULT_DEVICE_NAME.to_string())
            }
        };

        let convert = gstreamer::ElementFactory::make("videoconvert")
            .build()
            .map_err(|e| bool_error("videoconvert not available", e))?;

        let caps = gstreamer_video::VideoCapsBuilder::new()
            .format(gstreamer_video::VideoFormat::Rgba)
            .build();
        let appsink = AppSink::builder()
            .name("sink")
            .caps(&caps)
            .max_buffers(pipeline::MAX_BUFFERS)
            .drop(true)
            .sync(false)
            .build();

        let gst_pipeline = gstreamer::Pipeline::new();
        gst_pipeline.add_many([&source, &convert, appsink.upcast_ref()])?;
        gstreamer::Element::link_many([&source, &convert, appsink.upcast_ref()])?;

        let outlet = FrameOutlet::new(frames);
        let sample_outlet = outlet.clone();
        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
                    let frame = read_frame(appsink, frame_num)?;

                    match sample_outlet.push(frame) {
                        PushResult::Sent => Ok(gstreamer::FlowSuccess::Ok),
                        PushResult::Dropped => {
                            if frame_num % pipeline::FRAME_LOG_INTERVAL == 0 {
                                debug!(frame = frame_num, "Frame dropped (channel full)");
                            }
                            Ok(gstreamer::FlowSuccess::Ok)
                        }
                        PushResult::Closed => {
                            debug!("Frame receiver gone, ending stream");
                            Err(gstreamer::FlowError::Eos)
                        }
                    }
                })
                .build(),
        );

        let mut stream = Self {
            pipeline: gst_pipeline,
            outlet,
            tracks: vec![source],
            device_name,
            stopped: false,
        };

        if let Err(e) = stream.start() {
            // Half-started pipelines still hold the device
            if let Err(stop_err) = stream.stop() {
                warn!(error = %stop_err, "Failed to tear down pipeline after start error");
            }
            return Err(e);
        }

        stream.watch_bus();
        info!(device = %stream.device_name, "Camera pipeline playing");
        Ok(stream)
    }

    /// Close the outlet when the running pipeline errors out or reaches EOS
    ///
    /// Nothing pops the bus after startup, so messages are dropped here
    /// instead of queueing.
    fn watch_bus(&self) {
        let Some(bus) = self.pipeline.bus() else {
            warn!("Pipeline has no bus, errors after start go unnoticed");
            return;
        };
        let outlet = self.outlet.clone();
        let device = self.device_name.clone();
        bus.set_sync_handler(move |_bus, message| {
            if outlet.is_closed() {
                return gstreamer::BusSyncReply::Drop;
            }
            match message.view() {
                gstreamer::MessageView::Error(err) => {
                    error!(
                        device = %device,
                        error = %err.error(),
                        debug = ?err.debug(),
                        "Camera pipeline error"
                    );
                    outlet.close();
                }
                gstreamer::MessageView::Eos(_) => {
                    info!(device = %device, "Camera pipeline reached end of stream");
                    outlet.close();
                }
                _ => {}
            }
            gstreamer::BusSyncReply::Drop
        });
    }

    fn start(&self) -> BackendResult<()> {
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Playing) {
            let detail = self.bus_error().unwrap_or_else(|| e.to_string());
            return Err(BackendError::InitializationFailed(detail));
        }

        let (result, state, pending) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            pipeline::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");

        if result.is_err() {
            let detail = self
                .bus_error()
                .unwrap_or_else(|| "pipeline failed to reach PLAYING".to_string());
            return Err(BackendError::InitializationFailed(detail));
        }
        if state != gstreamer::State::Playing {
            warn!(state = ?state, "Pipeline is not in PLAYING state yet");
        }
        Ok(())
    }

    /// First error message posted on the bus, if any
    fn bus_error(&self) -> Option<String> {
        let bus = self.pipeline.bus()?;
        let message = bus.pop_filtered(&[gstreamer::MessageType::Error])?;
        match message.view() {
            gstreamer::MessageView::Error(err) => Some(err.error().to_string()),
            _ => None,
        }
    }
}

impl CaptureStream for GstCaptureStream {
    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn active_tracks(&self) -> usize {
        if self.stopped { 0 } else { self.tracks.len() }
    }

    fn stop(&mut self) -> BackendResult<()> {
        if self.stopped {
            return Ok(());
        }
        info!(device = %self.device_name, "Stopping camera pipeline");

        self.outlet.close();
        if let Some(bus) = self.pipeline.bus() {
            bus.unset_sync_handler();
        }

        for track in &self.tracks {
            if let Err(e) = track.set_state(gstreamer::State::Null) {
                warn!(track = %track.name(), error = %e, "Failed to stop track");
            }
        }

        self.pipeline
            .set_state(gstreamer::State::Null)
            .map_err(|e| BackendError::Other(format!("Failed to stop pipeline: {}", e)))?;

        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            pipeline::STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => debug!(state = ?state, "Pipeline stopped"),
            Err(e) => debug!(error = ?e, state = ?state, "Pipeline state change had issues"),
        }

        self.stopped = true;
        Ok(())
    }
}

/// Pull one sample from the appsink as a packed RGBA frame
fn read_frame(appsink: &AppSink, frame_num: u64) -> Result<CameraFrame, gstreamer::FlowError> {
    let sample = appsink.pull_sample().map_err(|_| gstreamer::FlowError::Eos)?;

    let buffer = sample.buffer().ok_or_else(|| {
        error!(frame = frame_num, "No buffer in sample");
        gstreamer::FlowError::Error
    })?;
    let caps = sample.caps().ok_or_else(|| {
        error!(frame = frame_num, "No caps in sample");
        gstreamer::FlowError::Error
    })?;
    let info = VideoInfo::from_caps(caps).map_err(|e| {
        error!(frame = frame_num, error = ?e, "Failed to get video info");
        gstreamer::FlowError::Error
    })?;
    let map = buffer.map_readable().map_err(|e| {
        error!(frame = frame_num, error = ?e, "Failed to map buffer");
        gstreamer::FlowError::Error
    })?;

    let stride = info.stride()[0].max(0) as usize;
    let packed = pack_rgba_rows(map.as_slice(), info.width(), info.height(), stride)
        .ok_or_else(|| {
            warn!(frame = frame_num, stride, "Buffer shorter than frame geometry");
            gstreamer::FlowError::Error
        })?;

    if frame_num % pipeline::FRAME_LOG_INTERVAL == 0 {
        debug!(
            frame = frame_num,
            width = info.width(),
            height = info.height(),
            stride,
            "Frame received"
        );
    }

    CameraFrame::new(info.width(), info.height(), packed).ok_or(gstreamer::FlowError::Error)
}
