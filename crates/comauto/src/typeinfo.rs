//! Type-info introspection through `IDispatch::GetTypeInfo`

#![cfg(windows)]

use comauto_core::{MemberKind, TypeMembers, LCID_EN_US};
use windows::{core::BSTR, Win32::System::Com::ITypeInfo};

use crate::dispatch::Dispatch;

/// Member id of the type itself in `GetDocumentation`
const MEMBERID_NIL: i32 = -1;

fn type_info(obj: &Dispatch, lcid: u32) -> Option<ITypeInfo> {
    unsafe {
        let count = obj.as_idispatch().GetTypeInfoCount().ok()?;
        if count == 0 {
            return None;
        }
        obj.as_idispatch().GetTypeInfo(0, lcid).ok()
    }
}

fn member_name(info: &ITypeInfo, memid: i32) -> Option<String> {
    unsafe {
        let mut name = BSTR::new();
        let mut help_context = 0u32;
        info.GetDocumentation(memid, Some(&mut name), None, &mut help_context, None)
            .ok()?;
        Some(name.to_string())
    }
}

/// Name of the object's type, with leading underscores removed
/// (`_Workbook` becomes `Workbook`). `None` without type information.
pub fn type_name(obj: &Dispatch) -> Option<String> {
    let info = type_info(obj, LCID_EN_US)?;
    let name = member_name(&info, MEMBERID_NIL)?;
    Some(name.trim_start_matches('_').to_string())
}

/// Methods, readable and writable properties described by the object's type
/// information. Objects without type information give empty lists.
pub fn list_members(obj: &Dispatch) -> TypeMembers {
    let mut members = TypeMembers::new();
    let Some(info) = type_info(obj, 0) else {
        log::debug!("no type information available");
        return members;
    };

    unsafe {
        let attr = match info.GetTypeAttr() {
            Ok(attr) => attr,
            Err(e) => {
                log::debug!("GetTypeAttr failed: {e}");
                return members;
            }
        };

        for index in 0..(*attr).cFuncs as u32 {
            let desc = match info.GetFuncDesc(index) {
                Ok(desc) => desc,
                Err(e) => {
                    log::debug!("GetFuncDesc({index}) failed: {e}");
                    continue;
                }
            };

            let memid = (*desc).memid;
            let kind = MemberKind::from_invkind((*desc).invkind.0);
            if let (Some(kind), Some(name)) = (kind, member_name(&info, memid)) {
                members.push(kind, name);
            }

            info.ReleaseFuncDesc(desc);
        }

        info.ReleaseTypeAttr(attr);
    }

    members
}
