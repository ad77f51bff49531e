//! Executes the commands emitted by the shared list controller against
//! the resource client, feeding results back as list messages.

use seed::prelude::*;

use shared::list::{ListCmd, ListMsg};

use crate::api;
use crate::resource::Resource;

pub fn execute<R, Ms>(
    cmds: Vec<ListCmd>,
    token: Option<String>,
    orders: &mut impl Orders<Ms>,
    to_msg: fn(ListMsg<R::Record>) -> Ms,
) where
    R: Resource,
    Ms: 'static,
{
    for cmd in cmds {
        match cmd {
            ListCmd::Fetch(ticket, params) => {
                let token = token.clone();
                let params = if R::PAGINATED { Some(params) } else { None };
                orders.perform_cmd(async move {
                    let result = api::list::<R>(params, token)
                        .await
                        .map_err(|error| error.to_string());
                    to_msg(ListMsg::FetchArrived(ticket, result))
                });
            }
            ListCmd::Delete(id) => {
                let token = token.clone();
                orders.perform_cmd(async move {
                    let result = api::delete::<R>(id, token)
                        .await
                        .map_err(|error| error.to_string());
                    to_msg(ListMsg::DeleteFinished(result))
                });
            }
            ListCmd::Notify(notification) => {
                orders.notify(notification);
            }
        }
    }
}
