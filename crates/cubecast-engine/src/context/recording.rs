//! In-memory `GraphicsContext` that records every call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::device::{GraphicsError, SurfaceErrorAction};
use crate::transform::TransformUniform;

use super::{BufferDesc, BufferUsage, DrawCall, GraphicsContext, ProgramDesc, VertexAttribute};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer {
        id: usize,
        label: String,
        usage: BufferUsage,
        contents: Vec<u8>,
    },
    CreateProgram {
        id: usize,
        source: String,
        attributes: Vec<VertexAttribute>,
        depth_test: bool,
    },
    UploadTransforms {
        program: usize,
        transforms: TransformUniform,
    },
    DrawIndexed {
        program: usize,
        vertex_buffers: Vec<usize>,
        index_buffer: usize,
        index_count: u32,
        clear: [f32; 4],
    },
}

/// Shared call log; survives the context so failed acquisitions can be inspected.
pub(crate) type CallLog = Rc<RefCell<Vec<Call>>>;

pub(crate) struct RecordingContext {
    size: (u32, u32),
    log: CallLog,
    next_id: usize,
    /// Next draws fail with these actions, in order.
    pending_failures: Vec<SurfaceErrorAction>,
}

impl RecordingContext {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self::with_log(width, height, CallLog::default())
    }

    pub(crate) fn with_log(width: u32, height: u32, log: CallLog) -> Self {
        Self {
            size: (width, height),
            log,
            next_id: 0,
            pending_failures: Vec::new(),
        }
    }

    /// Acquisition that succeeds or fails without touching `log`.
    pub(crate) fn acquire(
        available: bool,
        log: CallLog,
    ) -> impl FnOnce() -> Result<Self, GraphicsError> {
        move || {
            if available {
                Ok(Self::with_log(800, 600, log))
            } else {
                Err(GraphicsError::Unavailable {
                    reason: "no adapter".to_string(),
                })
            }
        }
    }

    pub(crate) fn set_surface_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    pub(crate) fn fail_next_draw(&mut self, action: SurfaceErrorAction) {
        self.pending_failures.push(action);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GraphicsContext for RecordingContext {
    type Buffer = usize;
    type Program = usize;

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn create_buffer(&mut self, desc: &BufferDesc<'_>) -> usize {
        let id = self.next_id();
        self.log.borrow_mut().push(Call::CreateBuffer {
            id,
            label: desc.label.to_string(),
            usage: desc.usage,
            contents: desc.contents.to_vec(),
        });
        id
    }

    fn create_program(&mut self, desc: &ProgramDesc<'_>) -> usize {
        let id = self.next_id();
        self.log.borrow_mut().push(Call::CreateProgram {
            id,
            source: desc.source.to_string(),
            attributes: desc.attributes.to_vec(),
            depth_test: desc.depth_test,
        });
        id
    }

    fn upload_transforms(&mut self, program: &usize, transforms: &TransformUniform) {
        self.log.borrow_mut().push(Call::UploadTransforms {
            program: *program,
            transforms: *transforms,
        });
    }

    fn draw_indexed(&mut self, call: &DrawCall<'_, Self>) -> Result<(), SurfaceErrorAction> {
        if !self.pending_failures.is_empty() {
            return Err(self.pending_failures.remove(0));
        }

        self.log.borrow_mut().push(Call::DrawIndexed {
            program: *call.program,
            vertex_buffers: call.vertex_buffers.iter().map(|b| **b).collect(),
            index_buffer: *call.index_buffer,
            index_count: call.index_count,
            clear: call.clear,
        });
        Ok(())
    }
}
