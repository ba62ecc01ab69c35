//! User-choice and user-input specializations of the request bridge.

use crate::bridge::request_queue::{
    request_queue, RequestHandle, RequestReceiver,
};
use jk_protocol::request_models::{
    UserChoiceArgs, UserChoiceResult, UserInputArgs, UserInputResult,
};
use tokio::task::JoinHandle;

/// Handles an executor uses to raise blocking user requests.
///
/// Both calls resolve to a result whose `processed` flag is false when the
/// answering side went away instead of answering; callers must check the
/// flag rather than assume an answer was given.
#[derive(Clone)]
pub struct UserContext {
    pub choice: RequestHandle<UserChoiceArgs, UserChoiceResult>,
    pub input: RequestHandle<UserInputArgs, UserInputResult>,
}

impl UserContext {
    /// Ask the user to pick one of several options. Blocks the calling
    /// task until answered or abandoned.
    pub async fn get_user_choice(&self, args: UserChoiceArgs) -> UserChoiceResult {
        match self.choice.request(args).await {
            Ok(result) => result,
            Err(_) => UserChoiceResult {
                index: 0,
                processed: false,
            },
        }
    }

    /// Ask the user to edit a text value. Blocks the calling task until
    /// answered or abandoned.
    pub async fn get_user_input(&self, args: UserInputArgs) -> UserInputResult {
        match self.input.request(args).await {
            Ok(result) => result,
            Err(_) => UserInputResult {
                value: String::new(),
                processed: false,
            },
        }
    }
}

/// Answering-side receivers paired with a [`UserContext`].
pub struct UserContextReceivers {
    pub choice: RequestReceiver<UserChoiceArgs, UserChoiceResult>,
    pub input: RequestReceiver<UserInputArgs, UserInputResult>,
}

impl UserContextReceivers {
    /// Spawn answering loops driving both request kinds through the given
    /// callbacks (e.g. modal dialogs on the interaction thread).
    pub fn spawn_providers<C, I>(self, on_choice: C, on_input: I) -> (JoinHandle<()>, JoinHandle<()>)
    where
        C: FnMut(UserChoiceArgs) -> UserChoiceResult + Send + 'static,
        I: FnMut(UserInputArgs) -> UserInputResult + Send + 'static,
    {
        let choice = crate::bridge::request_queue::spawn_provider(self.choice, on_choice);
        let input = crate::bridge::request_queue::spawn_provider(self.input, on_input);
        (choice, input)
    }
}

/// Create a connected [`UserContext`] / [`UserContextReceivers`] pair.
pub fn user_context(capacity: usize) -> (UserContext, UserContextReceivers) {
    let (choice_handle, choice_receiver) = request_queue(capacity);
    let (input_handle, input_receiver) = request_queue(capacity);
    (
        UserContext {
            choice: choice_handle,
            input: input_handle,
        },
        UserContextReceivers {
            choice: choice_receiver,
            input: input_receiver,
        },
    )
}
