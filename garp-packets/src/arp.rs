use crate::{EthernetFrame, MacAddr, ARP_ETHER_TYPE, ETHERNET_MIN_FRAME_LEN, IPV4_ETHER_TYPE};
use std::convert::TryFrom;
use std::net::Ipv4Addr;

pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

pub enum ArpHardwareType {
    Ethernet = 1,
}

/// Length of the fixed part of an ARP message, before the addresses.
pub const ARP_FIXED_HEADER_LEN: usize = 8;

/// Length of an ARP message carrying Ethernet and IPv4 addresses.
pub const ARP_ETHERNET_IPV4_LEN: usize = ARP_FIXED_HEADER_LEN + 2 * 6 + 2 * 4;

const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_RANGE: (usize, usize) = (4, 5);
const PROTOCOL_ADDR_LEN_RANGE: (usize, usize) = (5, 6);
const OPCODE_RANGE: (usize, usize) = (6, 8);

///
/// EthernetFrame wrapper with getters/setters for the packet structure described in RFC 826
/// https://tools.ietf.org/html/rfc826
///
#[derive(Clone, Debug)]
pub struct ArpFrame {
    frame: EthernetFrame,
}

impl ArpFrame {
    ///
    /// Constructs a new, empty packet with a payload big enough for all ARP fields,
    /// given some hardware/protocol address lengths.
    ///
    pub fn new(hardware_addr_len: u8, protocol_addr_len: u8) -> Self {
        let payload_len = ARP_FIXED_HEADER_LEN
            + (2 * hardware_addr_len as usize)
            + (2 * protocol_addr_len as usize);
        let payload: Vec<u8> = vec![0; payload_len];

        let mut frame = EthernetFrame::empty();
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame.set_payload(payload.as_slice());

        let mut arp_frame = ArpFrame { frame };
        arp_frame.set_hardware_addr_len(hardware_addr_len);
        arp_frame.set_protocol_addr_len(protocol_addr_len);
        arp_frame
    }

    ///
    /// Builds a gratuitous ARP announcement: a broadcast reply in which `sender` claims `addr`.
    /// The sender and target protocol addresses are both `addr`, which is what tells neighbors to
    /// update their caches rather than treat the message as an answer to a request.
    ///
    pub fn gratuitous(sender: MacAddr, addr: Ipv4Addr) -> Self {
        let mut arp_frame = ArpFrame::new(6, 4);
        arp_frame.frame.set_dest_mac(MacAddr::BROADCAST);
        arp_frame.frame.set_src_mac(sender);

        arp_frame.set_hardware_type(ArpHardwareType::Ethernet as u16);
        arp_frame.set_protocol_type(IPV4_ETHER_TYPE);
        arp_frame.set_opcode(ArpOp::Reply as u16);
        arp_frame.set_sender_hardware_addr(sender);
        arp_frame.set_sender_protocol_addr(addr);
        arp_frame.set_target_hardware_addr(MacAddr::BROADCAST);
        arp_frame.set_target_protocol_addr(addr);
        arp_frame
    }

    pub fn hardware_type(&self) -> u16 {
        let (start, end) = HARDWARE_TYPE_RANGE;
        be_u16(self.arp_data(start, end))
    }

    pub fn protocol_type(&self) -> u16 {
        let (start, end) = PROTOCOL_TYPE_RANGE;
        be_u16(self.arp_data(start, end))
    }

    pub fn hardware_addr_len(&self) -> u8 {
        let (start, _) = HARDWARE_ADDR_LEN_RANGE;
        self.arp_data(start, start + 1)[0]
    }

    pub fn protocol_addr_len(&self) -> u8 {
        let (start, _) = PROTOCOL_ADDR_LEN_RANGE;
        self.arp_data(start, start + 1)[0]
    }

    pub fn opcode(&self) -> u16 {
        let (start, end) = OPCODE_RANGE;
        be_u16(self.arp_data(start, end))
    }

    pub fn sender_hardware_addr(&self) -> &[u8] {
        let (start, end) = self.sender_hardware_addr_range();
        self.arp_data(start, end)
    }

    pub fn sender_protocol_addr(&self) -> &[u8] {
        let (start, end) = self.sender_protocol_addr_range();
        self.arp_data(start, end)
    }

    pub fn target_hardware_addr(&self) -> &[u8] {
        let (start, end) = self.target_hardware_addr_range();
        self.arp_data(start, end)
    }

    pub fn target_protocol_addr(&self) -> &[u8] {
        let (start, end) = self.target_protocol_addr_range();
        self.arp_data(start, end)
    }

    pub fn set_hardware_type(&mut self, htype: u16) {
        let (start, end) = HARDWARE_TYPE_RANGE;
        self.set_arp_data(&htype.to_be_bytes(), start, end);
    }

    pub fn set_protocol_type(&mut self, ptype: u16) {
        let (start, end) = PROTOCOL_TYPE_RANGE;
        self.set_arp_data(&ptype.to_be_bytes(), start, end);
    }

    pub fn set_hardware_addr_len(&mut self, len: u8) {
        let (start, end) = HARDWARE_ADDR_LEN_RANGE;
        self.set_arp_data(&[len], start, end);
    }

    pub fn set_protocol_addr_len(&mut self, len: u8) {
        let (start, end) = PROTOCOL_ADDR_LEN_RANGE;
        self.set_arp_data(&[len], start, end);
    }

    pub fn set_opcode(&mut self, code: u16) {
        let (start, end) = OPCODE_RANGE;
        self.set_arp_data(&code.to_be_bytes(), start, end);
    }

    // The address setters assume the frame was built for 6-byte hardware and 4-byte protocol
    // addresses.
    pub fn set_sender_hardware_addr(&mut self, addr: MacAddr) {
        let (start, end) = self.sender_hardware_addr_range();
        self.set_arp_data(&addr.bytes, start, end);
    }

    pub fn set_sender_protocol_addr(&mut self, addr: Ipv4Addr) {
        let (start, end) = self.sender_protocol_addr_range();
        self.set_arp_data(&addr.octets(), start, end);
    }

    pub fn set_target_hardware_addr(&mut self, addr: MacAddr) {
        let (start, end) = self.target_hardware_addr_range();
        self.set_arp_data(&addr.bytes, start, end);
    }

    pub fn set_target_protocol_addr(&mut self, addr: Ipv4Addr) {
        let (start, end) = self.target_protocol_addr_range();
        self.set_arp_data(&addr.octets(), start, end);
    }

    /// True when the message announces its own sender protocol address.
    pub fn is_gratuitous(&self) -> bool {
        self.sender_protocol_addr() == self.target_protocol_addr()
    }

    pub fn ethernet(&self) -> &EthernetFrame {
        &self.frame
    }

    // Move ownership of the frame back to the caller
    pub fn frame(self) -> EthernetFrame {
        self.frame
    }

    // Returns the bytes in the ethernet frame between start and end, exclusive
    fn arp_data(&self, start: usize, end: usize) -> &[u8] {
        let frame_offset_start = self.frame.payload_offset + start;
        let frame_offset_end = self.frame.payload_offset + end;
        &self.frame.data[frame_offset_start..frame_offset_end]
    }

    fn set_arp_data(&mut self, bytes: &[u8], start: usize, end: usize) {
        let frame_offset_start = self.frame.payload_offset + start;
        let frame_offset_end = self.frame.payload_offset + end;
        self.frame.data[frame_offset_start..frame_offset_end].copy_from_slice(bytes);
    }

    fn sender_hardware_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;

        let start = ARP_FIXED_HEADER_LEN;
        let end = start + hlen;
        (start, end)
    }

    fn sender_protocol_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;
        let plen = self.protocol_addr_len() as usize;

        let start = ARP_FIXED_HEADER_LEN + hlen;
        let end = start + plen;
        (start, end)
    }

    fn target_hardware_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;
        let plen = self.protocol_addr_len() as usize;

        let start = ARP_FIXED_HEADER_LEN + hlen + plen;
        let end = start + hlen;
        (start, end)
    }

    fn target_protocol_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;
        let plen = self.protocol_addr_len() as usize;

        let start = ARP_FIXED_HEADER_LEN + (2 * hlen) + plen;
        let end = start + plen;
        (start, end)
    }
}

impl TryFrom<EthernetFrame> for ArpFrame {
    type Error = &'static str;

    ///
    /// Decorates the given EthernetFrame with ArpFrame getters/setters.
    /// Validates
    /// - The frame has an ARP ether type
    /// - The frame has a reasonable payload size given the hardware/protocol address lengths,
    ///   allowing trailing padding up to the Ethernet minimum frame size
    ///
    fn try_from(frame: EthernetFrame) -> Result<Self, Self::Error> {
        if frame.ether_type() != ARP_ETHER_TYPE {
            return Err("Frame does not have ARP ether type.");
        };

        let frame_len = frame.len();
        let arp_frame = ArpFrame { frame };
        let payload_len = arp_frame.frame.payload().len();

        if payload_len < ARP_FIXED_HEADER_LEN {
            return Err("Frame payload is too small");
        }

        let hlen = arp_frame.hardware_addr_len() as usize;
        let plen = arp_frame.protocol_addr_len() as usize;
        let expected = ARP_FIXED_HEADER_LEN + (2 * hlen) + (2 * plen);

        if payload_len < expected || (payload_len > expected && frame_len > ETHERNET_MIN_FRAME_LEN)
        {
            return Err("Frame payload doesn't match address length fields");
        }

        Ok(arp_frame)
    }
}

fn be_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_empty_arp_frame() {
        let arp_frame = ArpFrame::new(6, 4);
        assert_eq!(arp_frame.hardware_type(), 0);
        assert_eq!(arp_frame.protocol_type(), 0);
        assert_eq!(arp_frame.hardware_addr_len(), 6);
        assert_eq!(arp_frame.protocol_addr_len(), 4);
        assert_eq!(arp_frame.opcode(), 0);
        assert_eq!(arp_frame.sender_hardware_addr(), [0, 0, 0, 0, 0, 0]);
        assert_eq!(arp_frame.sender_protocol_addr(), [0, 0, 0, 0]);
        assert_eq!(arp_frame.target_hardware_addr(), [0, 0, 0, 0, 0, 0]);
        assert_eq!(arp_frame.target_protocol_addr(), [0, 0, 0, 0]);
        assert_eq!(arp_frame.ethernet().ether_type(), ARP_ETHER_TYPE);
        assert_eq!(arp_frame.frame().len(), 42);
    }

    #[test]
    fn arp_frame_from_ethernet() -> Result<(), String> {
        let arp_payload: Vec<u8> = vec![
            0x00, 0x01, 0x00, 0x01, 0x06, 0x04, 0x00, 0x01, 1, 2, 3, 4, 5, 6, 10, 0, 0, 1, 10, 9,
            8, 7, 6, 5, 0xff, 0xff, 0xff, 0xff,
        ];
        let mut ethernet_frame = EthernetFrame::empty();
        ethernet_frame.set_payload(&arp_payload);
        ethernet_frame.set_ether_type(ARP_ETHER_TYPE);

        let arp_frame = ArpFrame::try_from(ethernet_frame)?;
        assert_eq!(arp_frame.hardware_type(), 1);
        assert_eq!(arp_frame.protocol_type(), 1);
        assert_eq!(arp_frame.hardware_addr_len(), 6);
        assert_eq!(arp_frame.protocol_addr_len(), 4);
        assert_eq!(arp_frame.opcode(), ArpOp::Request as u16);
        assert_eq!(arp_frame.sender_hardware_addr(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(arp_frame.sender_protocol_addr(), [10, 0, 0, 1]);
        assert_eq!(arp_frame.target_hardware_addr(), [10, 9, 8, 7, 6, 5]);
        assert_eq!(arp_frame.target_protocol_addr(), [0xff, 0xff, 0xff, 0xff]);
        assert!(!arp_frame.is_gratuitous());
        Ok(())
    }

    #[test]
    fn gratuitous_reply() {
        let mac = MacAddr::new([0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let addr = Ipv4Addr::new(192, 0, 2, 10);
        let arp_frame = ArpFrame::gratuitous(mac, addr);

        assert_eq!(arp_frame.ethernet().dest_mac(), MacAddr::BROADCAST);
        assert_eq!(arp_frame.ethernet().src_mac(), mac);
        assert_eq!(arp_frame.hardware_type(), ArpHardwareType::Ethernet as u16);
        assert_eq!(arp_frame.protocol_type(), IPV4_ETHER_TYPE);
        assert_eq!(arp_frame.opcode(), ArpOp::Reply as u16);
        assert_eq!(arp_frame.sender_hardware_addr(), mac.bytes);
        assert_eq!(arp_frame.sender_protocol_addr(), addr.octets());
        assert_eq!(arp_frame.target_hardware_addr(), MacAddr::BROADCAST.bytes);
        assert_eq!(arp_frame.target_protocol_addr(), addr.octets());
        assert!(arp_frame.is_gratuitous());
        assert_eq!(arp_frame.ethernet().payload().len(), ARP_ETHERNET_IPV4_LEN);
    }

    #[test]
    fn reject_wrong_ether_type() {
        let mut frame = ArpFrame::new(6, 4).frame();
        frame.set_ether_type(IPV4_ETHER_TYPE);
        assert_eq!(
            ArpFrame::try_from(frame).unwrap_err(),
            "Frame does not have ARP ether type."
        );
    }

    #[test]
    fn reject_short_payload() {
        let mut frame = EthernetFrame::empty();
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame.set_payload(&[0, 1, 8, 0, 6]);
        assert_eq!(
            ArpFrame::try_from(frame).unwrap_err(),
            "Frame payload is too small"
        );

        let mut truncated = ArpFrame::new(6, 4).frame();
        let payload = truncated.payload().into_owned();
        truncated.set_payload(&payload[..20]);
        assert_eq!(
            ArpFrame::try_from(truncated).unwrap_err(),
            "Frame payload doesn't match address length fields"
        );
    }

    #[test]
    fn accept_padded_frame() {
        let mac = MacAddr::new([0x02, 0, 0, 0, 0, 1]);
        let mut frame = ArpFrame::gratuitous(mac, Ipv4Addr::new(10, 0, 0, 1)).frame();
        frame.pad_to_minimum();

        let arp_frame = ArpFrame::try_from(frame).unwrap();
        assert_eq!(arp_frame.sender_hardware_addr(), mac.bytes);
        assert_eq!(arp_frame.target_protocol_addr(), [10, 0, 0, 1]);
    }

    #[test]
    fn reject_oversized_payload() {
        let mut frame = ArpFrame::new(6, 4).frame();
        let mut payload = frame.payload().into_owned();
        payload.resize(100, 0);
        frame.set_payload(&payload);
        assert!(ArpFrame::try_from(frame).is_err());
    }
}
