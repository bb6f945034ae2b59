//! [`Handler`] implementation backed by [`StudioService`].

use studiofs_projects::TemplateWriter;
use studiofs_protocol::Message;
use studiofs_protocol::messages::{
    FileContentResponse, PasteRequest, PathRequest, ProjectContentsRequest, ProjectNameRequest,
    RenameRequest, WriteFileRequest,
};
use studiofs_service::StudioService;

use crate::handler::Handler;
use crate::reply::{parse_request, respond, respond_empty};

impl<W: TemplateWriter + 'static> Handler for StudioService<W> {
    fn on_list_projects(&self, msg: &Message) -> Message {
        respond(msg, Ok(self.list_projects()))
    }

    fn on_create_project(&self, msg: &Message) -> Message {
        match parse_request::<ProjectNameRequest>(msg) {
            Ok(req) => respond_empty(msg, self.create_project(&req.name)),
            Err(reply) => reply,
        }
    }

    fn on_delete_project(&self, msg: &Message) -> Message {
        match parse_request::<ProjectNameRequest>(msg) {
            Ok(req) => respond_empty(msg, self.delete_project(&req.name)),
            Err(reply) => reply,
        }
    }

    fn on_list_project_contents(&self, msg: &Message) -> Message {
        match parse_request::<ProjectContentsRequest>(msg) {
            Ok(req) => respond(msg, self.list_project_contents(&req.project_name)),
            Err(reply) => reply,
        }
    }

    fn on_read_file(&self, msg: &Message) -> Message {
        match parse_request::<PathRequest>(msg) {
            Ok(req) => respond(
                msg,
                self.read_file(&req.project_name, &req.relative_path)
                    .map(|content| FileContentResponse { content }),
            ),
            Err(reply) => reply,
        }
    }

    fn on_write_file(&self, msg: &Message) -> Message {
        match parse_request::<WriteFileRequest>(msg) {
            Ok(req) => respond_empty(
                msg,
                self.write_file(&req.project_name, &req.relative_path, &req.content),
            ),
            Err(reply) => reply,
        }
    }

    fn on_create_file(&self, msg: &Message) -> Message {
        match parse_request::<PathRequest>(msg) {
            Ok(req) => respond_empty(msg, self.create_file(&req.project_name, &req.relative_path)),
            Err(reply) => reply,
        }
    }

    fn on_create_folder(&self, msg: &Message) -> Message {
        match parse_request::<PathRequest>(msg) {
            Ok(req) => {
                respond_empty(msg, self.create_folder(&req.project_name, &req.relative_path))
            }
            Err(reply) => reply,
        }
    }

    fn on_delete_path(&self, msg: &Message) -> Message {
        match parse_request::<PathRequest>(msg) {
            Ok(req) => respond_empty(msg, self.delete_path(&req.project_name, &req.relative_path)),
            Err(reply) => reply,
        }
    }

    fn on_rename(&self, msg: &Message) -> Message {
        match parse_request::<RenameRequest>(msg) {
            Ok(req) => respond_empty(
                msg,
                self.rename(&req.project_name, &req.relative_path, &req.new_name),
            ),
            Err(reply) => reply,
        }
    }

    fn on_copy(&self, msg: &Message) -> Message {
        match parse_request::<PathRequest>(msg) {
            Ok(req) => respond_empty(msg, self.copy(&req.project_name, &req.relative_path)),
            Err(reply) => reply,
        }
    }

    fn on_cut(&self, msg: &Message) -> Message {
        match parse_request::<PathRequest>(msg) {
            Ok(req) => respond_empty(msg, self.cut(&req.project_name, &req.relative_path)),
            Err(reply) => reply,
        }
    }

    fn on_paste(&self, msg: &Message) -> Message {
        match parse_request::<PasteRequest>(msg) {
            Ok(req) => respond_empty(
                msg,
                self.paste(&req.project_name, &req.destination_relative_path),
            ),
            Err(reply) => reply,
        }
    }

    fn on_get_clipboard(&self, msg: &Message) -> Message {
        respond(msg, Ok(self.clipboard()))
    }
}
