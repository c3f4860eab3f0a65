use crate::InterfaceInfo;
use garp_packets::ArpFrame;
use std::net::Ipv4Addr;

/// Builds the 42-byte gratuitous ARP reply announcing `target` at the interface's MAC.
/// Every call returns a new buffer.
pub fn build(iface: &InterfaceInfo, target: Ipv4Addr) -> Vec<u8> {
    ArpFrame::gratuitous(iface.mac, target).frame().data
}

/// Same as [`build`], zero-padded to the 60-byte Ethernet minimum.
pub fn build_padded(iface: &InterfaceInfo, target: Ipv4Addr) -> Vec<u8> {
    let mut frame = ArpFrame::gratuitous(iface.mac, target).frame();
    frame.pad_to_minimum();
    frame.data
}
