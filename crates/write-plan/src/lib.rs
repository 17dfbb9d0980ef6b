//! Planning chunked writes for payloads larger than one transport message.
//!
//! A payload that fits in a single message is carried inline by its finalize
//! step. Anything larger is staged through an external buffer: one allocate
//! step reserving the full length, ordered write steps each carrying one
//! chunk, and a finalize step referencing the buffer. The planner only
//! produces the ordered step list; executing it, and the fact that a fault
//! between steps leaves the buffer partially written, are the submitter's
//! concern.

use thiserror::Error;

/// Default write chunk size in bytes.
///
/// Sized to stay under a transport message's effective payload ceiling once
/// framing and account overhead are subtracted.
pub const DEFAULT_CHUNK_SIZE: usize = 850;

/// Errors from building a write plan.
#[derive(Debug, Error)]
pub enum WritePlanError {
    /// Chunk size was zero.
    #[error("chunk size must be nonzero")]
    InvalidChunkSize,
}

/// Wrapper result type.
pub type WritePlanResult<T> = Result<T, WritePlanError>;

/// Chunking policy for write plans.
///
/// A policy always holds a valid (nonzero) chunk size; the check happens at
/// construction, before any plan is built. The inline threshold equals the
/// chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    chunk_size: usize,
}

impl ChunkPolicy {
    /// Constructs a policy, rejecting a zero chunk size.
    pub fn new(chunk_size: usize) -> WritePlanResult<Self> {
        if chunk_size == 0 {
            return Err(WritePlanError::InvalidChunkSize);
        }
        Ok(Self { chunk_size })
    }

    /// Returns the chunk size in bytes.
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Where the finalize step finds the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource<'p> {
    /// The whole payload rides in the finalize step itself.
    Inline(&'p [u8]),

    /// The payload was staged into the external buffer by the preceding
    /// write steps.
    Buffer,
}

/// One step of a write plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep<'p> {
    /// Reserve the external buffer.  Declares the total length and carries
    /// no data.
    Allocate {
        /// Total payload length in bytes.
        total_len: usize,
    },

    /// Write one chunk at the given buffer offset.
    Write {
        /// Byte offset of this chunk in the buffer.
        offset: usize,

        /// Set on the first write only, telling the submitter to clobber
        /// whatever a previous, abandoned sequence left behind.
        overwrite: bool,

        /// The chunk bytes.
        data: &'p [u8],
    },

    /// Complete the operation from the given payload source.
    Finalize {
        /// Where the payload lives.
        source: PayloadSource<'p>,
    },
}

/// An ordered, immutable list of steps for the submitter to execute.
///
/// The order is the contract: the allocate step (if any) precedes every
/// write, and every write precedes the finalize step. The sequence is not
/// atomic across steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePlan<'p> {
    steps: Vec<WriteStep<'p>>,
}

impl<'p> WritePlan<'p> {
    /// Gets the steps, in submission order.
    pub fn steps(&self) -> &[WriteStep<'p>] {
        &self.steps
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// A plan always has at least its finalize step.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a, 'p> IntoIterator for &'a WritePlan<'p> {
    type Item = &'a WriteStep<'p>;
    type IntoIter = core::slice::Iter<'a, WriteStep<'p>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Plans the writes for a payload under the given chunking policy.
///
/// Payloads no larger than the chunk size produce a single finalize step
/// carrying the payload inline. Larger payloads produce an allocate step,
/// one write per chunk in ascending offset order with only the first flagged
/// `overwrite`, and a finalize step referencing the buffer.
pub fn plan_write<'p>(payload: &'p [u8], policy: &ChunkPolicy) -> WritePlan<'p> {
    let chunk_size = policy.chunk_size();
    let mut steps = Vec::new();

    if payload.len() <= chunk_size {
        steps.push(WriteStep::Finalize {
            source: PayloadSource::Inline(payload),
        });
    } else {
        steps.push(WriteStep::Allocate {
            total_len: payload.len(),
        });
        for (i, data) in payload.chunks(chunk_size).enumerate() {
            steps.push(WriteStep::Write {
                offset: i * chunk_size,
                overwrite: i == 0,
                data,
            });
        }
        steps.push(WriteStep::Finalize {
            source: PayloadSource::Buffer,
        });
    }

    WritePlan { steps }
}
