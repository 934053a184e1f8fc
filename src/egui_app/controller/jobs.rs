use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::prediction::{
    ExportError, ExportJob, PredictionApi, PredictionError, PredictionJob, PredictionResponse,
};

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
    ExportFinished(ExportJobResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) result: Result<PredictionResponse, PredictionError>,
}

#[derive(Debug)]
pub(crate) struct ExportJobResult {
    pub(crate) result: Result<PathBuf, ExportError>,
}

/// Worker threads for network calls, reporting back over one channel.
pub(crate) struct ControllerJobs {
    api: Arc<dyn PredictionApi>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    repaint: Option<egui::Context>,
}

impl ControllerJobs {
    pub(super) fn new(api: Arc<dyn PredictionApi>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            api,
            message_tx,
            message_rx,
            repaint: None,
        }
    }

    /// Wake the UI when a worker finishes instead of waiting for input.
    pub(super) fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn begin_prediction(&self, job: PredictionJob) {
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let result = job.run(api.as_ref());
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult { result }));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub(super) fn begin_export(&self, job: ExportJob) {
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let result = job.run(api.as_ref());
            let _ = tx.send(JobMessage::ExportFinished(ExportJobResult { result }));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}
